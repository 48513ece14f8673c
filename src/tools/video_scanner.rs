use crate::error::Result;
use crate::tools::validate_directory_exists;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 可辨識的影片副檔名（比對時不分大小寫）
pub const VIDEO_EXTENSIONS: [&str; 4] = [".mp4", ".mov", ".avi", ".mkv"];

#[must_use]
pub fn is_video_file_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// 列出資料夾第一層的影片檔，依路徑字典序排序
pub fn scan_video_files(directory: &Path) -> Result<Vec<PathBuf>> {
    validate_directory_exists(directory)?;

    let mut video_files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory walk failed"))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_video_file_name(&entry.file_name().to_string_lossy()) {
            video_files.push(entry.into_path());
        }
    }

    video_files.sort();
    Ok(video_files)
}
