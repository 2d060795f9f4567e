//! LLM Prompt 模板
//!
//! 定义项目讲解和 Markdown 排版两个 Prompt 模板

/// 项目讲解 Prompt
pub const PROJECT_ANALYSIS_PROMPT: &str = r#"Analyze and explain the following source code in detail, IN ENGLISH, for a technical audience.

**Instructions:**
- Describe the general purpose of the project and its main functionality.
- Explain the role of each important file or folder.
- Detail the functionality of key modules, classes, and functions.
- Highlight specific algorithms or logic, with examples if possible.
- Specify the dependencies or libraries used and their purpose.
- If parts of the code are complex, break them down step by step.
- Add advice or remarks on the architecture or code style if relevant.

**Input Data:**
Summary: {summary}
Tree: {tree}
File Contents: {content}
"#;

/// Markdown 排版 Prompt
pub const MARKDOWN_FORMAT_PROMPT: &str = r#"You are an expert in technical writing and Markdown.

Reformat and translate the text below into English if necessary, correcting all spelling and grammar mistakes. Transform it into a clear, structured, and professional Markdown document.

**Instructions:**
- Use hierarchical headings (#, ##, ###) in English
- Properly format lists, tables, and code blocks
- Add an automatic table of contents at the beginning of the document
- Do not wrap the whole document in a ```markdown code block
- Ensure all text is written in correct and natural English
- Correct all language or syntax errors
- If the text contains technical terms or code, keep them as they are
- Only return the reformatted content for direct use.

Text to reformat:
{raw_doc}
"#;

/// 截取前 `max_chars` 个字符（按 Unicode 字符计数，不附加截断标记）
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// 格式化项目讲解 Prompt
///
/// 源码中出现的 `{tree}` 等文本不会被二次替换
pub fn format_project_analysis_prompt(summary: &str, tree: &str, content: &str) -> String {
    fill_template(
        PROJECT_ANALYSIS_PROMPT,
        &[("{summary}", summary), ("{tree}", tree), ("{content}", content)],
    )
}

/// 格式化 Markdown 排版 Prompt
pub fn format_markdown_prompt(raw_doc: &str) -> String {
    fill_template(MARKDOWN_FORMAT_PROMPT, &[("{raw_doc}", raw_doc)])
}

/// 单次扫描模板，只替换模板自身的占位符
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
