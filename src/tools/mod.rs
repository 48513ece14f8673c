mod ffmpeg_command;
mod ffprobe_info;
mod path_validator;
mod process_runner;
mod video_scanner;

pub use ffmpeg_command::{
    AUDIO_CODEC, ConcatCommand, PIXEL_FORMAT, SegmentCommand, VIDEO_CODEC, concat_manifest,
};
pub(crate) use ffprobe_info::FfprobeOutput;
pub use ffprobe_info::{FfprobeProber, MediaInfo, Prober, Resolution, parse_media_info};
pub use path_validator::validate_directory_exists;
pub use process_runner::{ProcessOutput, run_with_timeout};
pub use video_scanner::{VIDEO_EXTENSIONS, is_video_file_name, scan_video_files};
