//! UTF-16 string conversion for Windows API results

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

/// Convert a Windows wide string (UTF-16) to a Rust string, stopping at the
/// first NUL
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    OsString::from_wide(&wide[..len])
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_to_string() {
        let wide = vec![71, 97, 109, 101, 46, 101, 120, 101, 0, 120];
        assert_eq!(wide_to_string(&wide), "Game.exe");

        let no_null = vec![72, 101, 108, 108, 111];
        assert_eq!(wide_to_string(&no_null), "Hello");

        assert_eq!(wide_to_string(&[]), "");
    }
}
