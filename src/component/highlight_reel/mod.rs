//! 精華影片元件
//!
//! 依拍攝時間排序資料夾中的影片，每隔固定間隔擷取短片段，
//! 統一縮放到最低解析度後串接成單一影片

mod clip_sampler;
mod main;
mod media_engine;
mod metadata_reader;
mod reel_assembler;
mod video_catalog;

pub use clip_sampler::{ClipSampler, ClipSegment};
pub use main::{HighlightReel, RunReport, process_files};
pub use media_engine::{FfmpegEngine, MediaEngine};
pub use metadata_reader::{
    CREATION_DATE_TAG, CaptureTime, MetadataReader, normalize_timestamp, parse_timestamp,
};
pub use reel_assembler::{ReelAssembler, ReelSummary};
pub use video_catalog::{
    Catalog, SourceVideo, VideoCatalog, order_by_capture_time, select_target_resolution,
};
