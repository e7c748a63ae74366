use std::fs;
use std::path::PathBuf;

#[cfg(not(windows))]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let os_str = OsStr::from_bytes(bytes);
    PathBuf::from(os_str)
}

#[cfg(windows)]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    let s = std::str::from_utf8(bytes).expect("Invalid UTF-8");
    PathBuf::from(s)
}

#[cfg(unix)]
pub fn file_size(metadata: &fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.size()
}

#[cfg(windows)]
pub fn file_size(metadata: &fs::Metadata) -> u64 {
    use std::os::windows::fs::MetadataExt;
    metadata.file_size()
}
