//! Testing utilities and mock implementations.
//!
//! [`MockToolRunner`] replays scripted `makemkvcon` runs so scans and
//! extractions can be tested without MakeMKV installed, and
//! [`RecordingReporter`] keeps every reported message for assertions.
//!
//! # Example
//!
//! ```rust,ignore
//! use bdrip_core::testing::{fixtures, MockToolRunner, ScriptedRun};
//!
//! let runner = MockToolRunner::new();
//! runner.push_run(ScriptedRun::new(fixtures::INFO_OUTPUT.lines())).await;
//!
//! // Hand a clone to the scanner, keep the original for assertions
//! let scanner = TitleScanner::new(runner.clone(), reporter);
//! ```

mod mock_tool_runner;
mod recording_reporter;

pub use mock_tool_runner::{MockToolRunner, ScriptedRun};
pub use recording_reporter::RecordingReporter;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::time::Duration;

    use crate::titles::TitleRecord;

    /// `makemkvcon -r info` output for a disc holding a movie, four bonus
    /// features and a short clip whose size is given in megabytes.
    pub const INFO_OUTPUT: &str = r#"MSG:1005,0,1,"MakeMKV v1.17.7 linux(x64-release) started","%1 started","MakeMKV v1.17.7 linux(x64-release)"
DRV:0,256,999,0,"","",""
MSG:3007,0,0,"Using direct disc access mode","Using direct disc access mode"
MSG:5085,0,0,"Loaded content hash table, will verify integrity of M2TS files.","Loaded content hash table, will verify integrity of M2TS files."
MSG:3307,0,2,"File 00004.mpls was added as title #0","File %1 was added as title #%2","00004.mpls","0"
MSG:3307,0,2,"File 00005.mpls was added as title #1","File %1 was added as title #%2","00005.mpls","1"
MSG:3025,0,3,"Title #00007.mpls has length of 5 seconds which is less than minimum title length of 120 seconds and was therefore skipped","Title #%1 has length of %2 seconds which is less than minimum title length of %3 seconds and was therefore skipped","00007.mpls","5","120"
MSG:5011,0,0,"Operation successfully completed","Operation successfully completed"
TCOUNT:6
CINFO:1,6209,"Blu-ray disc"
CINFO:2,0,"SUPER MOVIE"
CINFO:28,0,"eng"
CINFO:30,0,"SUPER MOVIE"
CINFO:32,0,"SUPER_MOVIE"
TINFO:0,2,0,"SUPER MOVIE"
TINFO:0,8,0,"2"
TINFO:0,9,0,"0:11:33"
TINFO:0,10,0,"1.6 GB"
TINFO:0,11,0,"1733591040"
TINFO:0,16,0,"00004.mpls"
TINFO:0,25,0,"1"
TINFO:0,26,0,"00012"
TINFO:0,27,0,"MOVIE_t00.mkv"
TINFO:0,30,0,"SUPER MOVIE - 2 chapter(s) , 1.6 GB"
TINFO:0,31,6120,"<b>Title information</b><br>"
SINFO:0,0,1,6201,"Video"
SINFO:0,0,5,0,"V_MPEG4/ISO/AVC"
SINFO:0,0,19,0,"1920x1080"
SINFO:0,1,1,6202,"Audio"
SINFO:0,1,3,0,"eng"
TINFO:1,2,0,"SUPER MOVIE"
TINFO:1,8,0,"2"
TINFO:1,9,0,"0:18:00"
TINFO:1,10,0,"2.6 GB"
TINFO:1,11,0,"2803507200"
TINFO:1,16,0,"00005.mpls"
TINFO:1,25,0,"1"
TINFO:1,26,0,"00013"
TINFO:1,27,0,"MOVIE_t01.mkv"
TINFO:1,30,0,"SUPER MOVIE - 2 chapter(s) , 2.6 GB"
SINFO:1,0,1,6201,"Video"
SINFO:1,1,1,6202,"Audio"
TINFO:2,2,0,"SUPER MOVIE"
TINFO:2,8,0,"3"
TINFO:2,9,0,"0:23:28"
TINFO:2,10,0,"3.4 GB"
TINFO:2,11,0,"3656754176"
TINFO:2,16,0,"00006.mpls"
TINFO:2,25,0,"1"
TINFO:2,26,0,"00014"
TINFO:2,27,0,"MOVIE_t02.mkv"
TINFO:2,30,0,"SUPER MOVIE - 3 chapter(s) , 3.4 GB"
SINFO:2,0,1,6201,"Video"
SINFO:2,1,1,6202,"Audio"
TINFO:3,2,0,"SUPER MOVIE"
TINFO:3,8,0,"4"
TINFO:3,9,0,"0:41:28"
TINFO:3,10,0,"6.0 GB"
TINFO:3,11,0,"6442450944"
TINFO:3,16,0,"00008.mpls"
TINFO:3,25,0,"1"
TINFO:3,26,0,"00015"
TINFO:3,27,0,"MOVIE_t03.mkv"
TINFO:3,30,0,"SUPER MOVIE - 4 chapter(s) , 6.0 GB"
SINFO:3,0,1,6201,"Video"
SINFO:3,1,1,6202,"Audio"
TINFO:4,2,0,"SUPER MOVIE"
TINFO:4,8,0,"16"
TINFO:4,9,0,"2:14:34"
TINFO:4,10,0,"31.8 GB"
TINFO:4,11,0,"34144990003"
TINFO:4,16,0,"00800.mpls"
TINFO:4,25,0,"3"
TINFO:4,26,0,"00001,00002,00003"
TINFO:4,27,0,"MOVIE_t04.mkv"
TINFO:4,30,0,"SUPER MOVIE - 16 chapter(s) , 31.8 GB"
TINFO:4,31,6120,"<b>Title information</b><br>"
SINFO:4,0,1,6201,"Video"
SINFO:4,0,5,0,"V_MPEG4/ISO/AVC"
SINFO:4,1,1,6202,"Audio"
SINFO:4,1,3,0,"eng"
SINFO:4,2,1,6202,"Audio"
SINFO:4,2,3,0,"fra"
TINFO:5,2,0,"SUPER MOVIE"
TINFO:5,8,0,"1"
TINFO:5,9,0,"0:02:10"
TINFO:5,10,0,"183.2 MB"
TINFO:5,11,0,"192099123"
TINFO:5,16,0,"00010.mpls"
TINFO:5,25,0,"1"
TINFO:5,26,0,"00020"
TINFO:5,27,0,"MOVIE_t05.mkv"
TINFO:5,30,0,"SUPER MOVIE - 1 chapter(s) , 183.2 MB"
SINFO:5,0,1,6201,"Video"
"#;

    /// Info output for a disc with the same movie twice, once per audio
    /// language.
    pub const AMBIGUOUS_INFO_OUTPUT: &str = r#"MSG:1005,0,1,"MakeMKV v1.17.7 linux(x64-release) started","%1 started","MakeMKV v1.17.7 linux(x64-release)"
TCOUNT:3
CINFO:2,0,"SUPER MOVIE"
TINFO:0,8,0,"16"
TINFO:0,9,0,"2:14:34"
TINFO:0,10,0,"31.8 GB"
TINFO:0,27,0,"MOVIE_t00.mkv"
TINFO:1,8,0,"16"
TINFO:1,9,0,"2:14:34"
TINFO:1,10,0,"31.8 GB"
TINFO:1,27,0,"MOVIE_t01.mkv"
TINFO:2,8,0,"2"
TINFO:2,9,0,"0:11:33"
TINFO:2,10,0,"1.6 GB"
TINFO:2,27,0,"MOVIE_t02.mkv"
"#;

    /// `makemkvcon mkv` output of a successful extraction.
    pub const EXTRACTION_SUCCESS_OUTPUT: &str = "MakeMKV v1.17.7 linux(x64-release) started
Using direct disc access mode
Loaded content hash table, will verify integrity of M2TS files.
Saving 1 titles into directory file:///library/movies
Operation successfully completed
Copy complete. 1 titles saved.
";

    /// `makemkvcon mkv` output of an extraction that failed halfway. MakeMKV
    /// still exits with 0 in this case.
    pub const EXTRACTION_FAILURE_OUTPUT: &str = "MakeMKV v1.17.7 linux(x64-release) started
Using direct disc access mode
Saving 1 titles into directory file:///library/movies
Error 'Scsi error - MEDIUM ERROR:L-EC UNCORRECTABLE ERROR' occurred while reading '/BDMV/STREAM/00001.m2ts' at offset '1048576'
Failed to save title 4 to file /library/movies/MOVIE_t04.mkv
Copy complete. 0 titles saved, 1 failed.

";

    /// Create a title record with MakeMKV's default output file name.
    pub fn title_record(index: u32, chapter_count: u32, secs: u64, size_gib: f64) -> TitleRecord {
        TitleRecord {
            index,
            chapter_count,
            duration: Duration::from_secs(secs),
            size_gib,
            output_file_name: format!("MOVIE_t{:02}.mkv", index),
        }
    }

    /// The complete titles of [`INFO_OUTPUT`], in index order.
    pub fn movie_titles() -> Vec<TitleRecord> {
        vec![
            title_record(0, 2, 693, 1.6),
            title_record(1, 2, 1080, 2.6),
            title_record(2, 3, 1408, 3.4),
            title_record(3, 4, 2488, 6.0),
            title_record(4, 16, 8074, 31.8),
        ]
    }
}
