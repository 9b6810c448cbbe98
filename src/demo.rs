use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

const ACCESS_LOG: &str = r#"192.168.1.1 - - [01/Dec/2023:12:00:00 +0000] "GET /index.html HTTP/1.1" 200 1234 "-" "Mozilla/5.0"
192.168.1.2 - - [01/Dec/2023:12:01:00 +0000] "POST /api/login HTTP/1.1" 401 567 "-" "curl/7.68.0"
192.168.1.1 - - [01/Dec/2023:12:02:00 +0000] "GET /dashboard HTTP/1.1" 500 890 "-" "Mozilla/5.0"
192.168.1.3 - - [01/Dec/2023:12:03:00 +0000] "GET /api/data HTTP/1.1" 200 2345 "-" "Python-requests/2.28.1"
"#;

const APPLICATION_LOG: &str = "2023-12-01 12:00:00 [INFO] Application started successfully
2023-12-01 12:01:00 [ERROR] Database connection failed: timeout after 30s
2023-12-01 12:02:00 [WARN] High memory usage detected: 85%
2023-12-01 12:03:00 [INFO] User authentication successful
2023-12-01 12:04:00 [ERROR] Failed to process payment: invalid card number
2023-12-01 12:05:00 [FATAL] Critical system error: out of memory
";

/// Write a small access log and application log into `dir` (created if
/// needed) and return their paths
pub fn write_sample_logs(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| AnalyzerError::io(dir, e))?;

    let mut paths = Vec::with_capacity(2);
    for (name, contents) in [("access.log", ACCESS_LOG), ("application.log", APPLICATION_LOG)] {
        let path = dir.join(name);
        fs::write(&path, contents).map_err(|e| AnalyzerError::io(&path, e))?;
        paths.push(path);
    }
    Ok(paths)
}
