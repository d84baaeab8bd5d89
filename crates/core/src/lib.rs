pub mod batch;
pub mod config;
pub mod disc;
pub mod extraction;
pub mod makemkv;
pub mod reporter;
pub mod testing;
pub mod titles;

pub use batch::{BatchError, BatchJob, BatchReport, ConversionBatch, DiscReport, PostProcessStatus};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use disc::{find_blu_ray_discs, Disc, DiscError, DiscKind};
pub use extraction::{ConversionResult, ExtractionJob, FinalName, TitleExtractor};
pub use makemkv::{find_makemkv_binary, MakemkvError, MakemkvRunner, ToolRunner};
pub use reporter::{NzbgetReporter, Reporter, TracingReporter};
pub use titles::{TitleRecord, TitleScanner, TitleSelection, TitleSelector};
