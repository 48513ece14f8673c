use clap::Parser;
use highlight_reel::config::ReelParameters;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "highlight_reel")]
#[command(version, about = "Process and stitch video clips.")]
pub struct Cli {
    /// Folder containing video files
    #[arg(long = "input_folder", default_value = ".")]
    pub input_folder: PathBuf,

    /// Output file name
    #[arg(long = "output_file", default_value = "out.mp4")]
    pub output_file: PathBuf,

    /// Duration of each clip to extract in seconds
    #[arg(long = "clip_duration", default_value_t = 3.0)]
    pub clip_duration: f64,

    /// Duration to skip forward in seconds
    #[arg(long = "skip_duration", default_value_t = 7.0)]
    pub skip_duration: f64,

    /// Tool settings file (default: ./highlight_reel.json)
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

impl Cli {
    pub fn parameters(&self) -> ReelParameters {
        ReelParameters {
            input_folder: self.input_folder.clone(),
            output_file: self.output_file.clone(),
            clip_duration: self.clip_duration,
            skip_duration: self.skip_duration,
        }
    }
}
