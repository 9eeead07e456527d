use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

pub const NOVA_LOG: &str = "\
2013-09-27 18:22:11.248 1234 DEBUG nova.compute [-] polling instances
2013-09-27 18:22:12.001 1234 INFO nova.compute [-] instance spawned
2013-09-27 18:22:13.500 1234 ERROR nova.compute [-] spawn failed <timeout>
Traceback (most recent call last):
  File \"manager.py\", line 42, in spawn
2013-09-27 18:22:14.000 1234 INFO nova.compute [-] retrying
";

/// A throwaway log root laid out like a CI job's log directory.
pub struct LogRoot {
    dir: TempDir,
}

impl LogRoot {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create log root");
        let root = Self { dir };

        root.write("logs/screen-n-cpu.txt", NOVA_LOG.as_bytes());
        root.write(
            "logs/job-output.html",
            b"<!DOCTYPE html>\n<html><body><p>done</p></body></html>\n",
        );
        root.write_gz("logs/syslog.txt.gz", b"Sep 27 18:22:11 devstack tgtd: chatter\nSep 27 18:22:12 devstack sudo: session opened\n");
        root
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &[u8]) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(path, contents).expect("failed to write fixture");
    }

    pub fn write_gz(&self, name: &str, contents: &[u8]) {
        let mut gz = GzEncoder::new(Vec::new(), Compression::default());
        gz.write_all(contents).expect("failed to compress fixture");
        self.write(name, &gz.finish().expect("failed to compress fixture"));
    }
}

impl Default for LogRoot {
    fn default() -> Self {
        Self::new()
    }
}
