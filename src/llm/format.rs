//! 后端 URL 规范化工具

/// 修复 base_url
///
/// - 去除首尾空白
/// - 修复路径中的双斜杠（保留协议部分）
/// - 无查询串时去除末尾斜杠
///
/// 查询串和片段原样保留
pub fn fix_base_url(base_url: &str) -> String {
    let url = base_url.trim();
    let split = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let (base, suffix) = url.split_at(split);

    let mut base = if suffix.is_empty() {
        base.trim_end_matches('/').to_string()
    } else {
        base.to_string()
    };

    // 修复双斜杠（跳过协议部分）
    if let Some(pos) = base.find("://") {
        let (protocol, rest) = base.split_at(pos + 3);
        let mut fixed_rest = rest.to_string();
        while fixed_rest.contains("//") {
            fixed_rest = fixed_rest.replace("//", "/");
        }
        base = format!("{}{}", protocol, fixed_rest);
    }

    format!("{}{}", base, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_base_url() {
        assert_eq!(
            fix_base_url("http://localhost:11434/api/generate/"),
            "http://localhost:11434/api/generate"
        );
        assert_eq!(
            fix_base_url("http://localhost:11434//api//generate"),
            "http://localhost:11434/api/generate"
        );
        assert_eq!(fix_base_url("  http://llm.lan///gen  "), "http://llm.lan/gen");
    }

    #[test]
    fn test_fix_base_url_keeps_plain_url() {
        assert_eq!(
            fix_base_url("https://llm.example.com/api/generate"),
            "https://llm.example.com/api/generate"
        );
    }

    #[test]
    fn test_fix_base_url_keeps_query_string() {
        assert_eq!(
            fix_base_url("http://h//gen?cb=http://x/"),
            "http://h/gen?cb=http://x/"
        );
        assert_eq!(
            fix_base_url("http://h/gen#frag//part"),
            "http://h/gen#frag//part"
        );
    }
}
