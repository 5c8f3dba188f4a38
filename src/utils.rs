/// Vault 根目录的路径
pub const ROOT_PATH: &str = "/";

/// 规范化 Vault 内的相对路径
///
/// 反斜杠转为 `/`，合并连续的 `/`，去掉首尾的 `/`。结果为空时返回根路径 `/`。
///
/// # Examples
/// ```
/// use auto_temp_cleaner::utils::normalize_path;
///
/// assert_eq!(normalize_path("//notes\\tmp/"), "notes/tmp");
/// assert_eq!(normalize_path("  "), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let normalized = path
        .trim()
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        ROOT_PATH.to_string()
    } else {
        normalized
    }
}

/// 拼接父目录与文件名，父目录为根时不加前缀
pub fn join_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH || parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// 父目录路径，顶层条目的父目录为根
pub fn parent_path(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((parent, _)) if !parent.is_empty() => parent,
        _ => ROOT_PATH,
    }
}

/// 路径最后一段
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// 扩展名：最后一个 `.` 之后的部分。以 `.` 开头且没有其它 `.` 的文件名没有扩展名
pub fn split_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx + 1..],
        _ => "",
    }
}

/// 分钟转毫秒
pub fn to_millis(minutes: u32) -> u64 {
    u64::from(minutes) * 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("tmp"), "tmp");
        assert_eq!(normalize_path(" tmp/ "), "tmp");
        assert_eq!(normalize_path("a\\b//c"), "a/b/c");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(join_path("/", "a.md"), "a.md");
        assert_eq!(join_path("tmp", "a.md"), "tmp/a.md");
        assert_eq!(parent_path("tmp/a.md"), "tmp");
        assert_eq!(parent_path("a.md"), "/");
        assert_eq!(file_name("tmp/sub/a.md"), "a.md");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("a.md"), "md");
        assert_eq!(split_extension("archive.tar.gz"), "gz");
        assert_eq!(split_extension("README"), "");
        assert_eq!(split_extension(".md"), "");
        assert_eq!(split_extension("NOTE.MD"), "MD");
    }

    #[test]
    fn test_to_millis() {
        assert_eq!(to_millis(0), 0);
        assert_eq!(to_millis(1440), 86_400_000);
    }
}
