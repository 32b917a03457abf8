//src/report_file.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::Result;

/// Default name of the report MultiGeneBlast writes into its output folder.
pub const DEFAULT_CLUSTERFILE: &str = "./clusterblast_output.txt";

/// Reads a whole report into memory. Files ending in `.gz` are decompressed.
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let f = File::open(path)?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let mut reader: Box<dyn Read> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    log::info!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Output file locations for one report: everything is written next to the
/// cluster file, named `<stem>_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    base: PathBuf,
}

impl OutputPaths {
    /// `stem` defaults to the cluster file path itself.
    pub fn new<P: AsRef<Path>>(clusterfile: P, stem: Option<&str>) -> Self {
        let clusterfile = clusterfile.as_ref();
        let dir = clusterfile.parent().unwrap_or_else(|| Path::new(""));
        let base = match stem {
            Some(stem) => dir.join(stem),
            None => clusterfile.to_path_buf(),
        };
        Self { base }
    }

    fn with_suffix(&self, suffix: &str) -> PathBuf {
        let mut name = self.base.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    pub fn query(&self) -> PathBuf {
        self.with_suffix("_queryinfo.tsv")
    }

    pub fn sighits(&self) -> PathBuf {
        self.with_suffix("_sighitinfo.tsv")
    }

    pub fn location(&self, hit_id: &str) -> PathBuf {
        self.with_suffix(&format!("_{hit_id}_locationinfo.tsv"))
    }

    pub fn blast(&self, hit_id: &str) -> PathBuf {
        self.with_suffix(&format!("_{hit_id}_blastinfo.tsv"))
    }

    pub fn coords(&self, hit_id: &str) -> PathBuf {
        self.with_suffix(&format!("_{hit_id}_coords.tsv"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_output_paths_with_stem() {
        let paths = OutputPaths::new("/runs/mgb/clusterblast_output.txt", Some("pks"));
        assert_eq!(paths.query(), PathBuf::from("/runs/mgb/pks_queryinfo.tsv"));
        assert_eq!(paths.sighits(), PathBuf::from("/runs/mgb/pks_sighitinfo.tsv"));
        assert_eq!(paths.location("AB01_c1"), PathBuf::from("/runs/mgb/pks_AB01_c1_locationinfo.tsv"));
        assert_eq!(paths.blast("AB01_c1"), PathBuf::from("/runs/mgb/pks_AB01_c1_blastinfo.tsv"));
        assert_eq!(paths.coords("AB01_c1"), PathBuf::from("/runs/mgb/pks_AB01_c1_coords.tsv"));
    }

    #[test]
    fn test_output_paths_default_stem() {
        let paths = OutputPaths::new("out/clusterblast_output.txt", None);
        assert_eq!(paths.query(), PathBuf::from("out/clusterblast_output.txt_queryinfo.tsv"));

        let paths = OutputPaths::new("clusterblast_output.txt", Some("run"));
        assert_eq!(paths.sighits(), PathBuf::from("run_sighitinfo.tsv"));
    }

    #[test]
    fn test_read_plain_and_gzipped_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let text = "Significant hits:\nDetails:\n";

        let plain = dir.path().join("report.txt");
        fs::write(&plain, text).expect("write plain report");
        assert_eq!(read_report(&plain).expect("read plain"), text);

        let gz = dir.path().join("report.txt.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).expect("create gz"), Compression::default());
        encoder.write_all(text.as_bytes()).expect("write gz");
        encoder.finish().expect("finish gz");
        assert_eq!(read_report(&gz).expect("read gz"), text);

        assert!(read_report(dir.path().join("missing.txt")).is_err());
    }
}
