//! Prompt Assembly
//!
//! Builds the single natural-language instruction document sent to the LLM
//! from a file mapping, its project summary, and the user-selected output
//! language and documentation style.
//!
//! Pure string assembly with no failure modes. Each embedded file is
//! truncated to a per-style character budget and the number of embedded
//! files is capped per style; a note records how many files were omitted.

use crate::analyzer::ProjectSummary;
use crate::constants::prompt::{
    COMMENT_MAX_FILES, DEFAULT_FILE_CHARS, DEFAULT_MAX_FILES, MANUAL_FILE_CHARS, MANUAL_MAX_FILES,
};
use crate::ingest::filter::language_for_path;
use crate::types::FileMapping;

// =============================================================================
// Options
// =============================================================================

/// Output language for the generated documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLanguage {
    #[default]
    English,
    Chinese,
}

/// Documentation style template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocStyle {
    /// Comprehensive technical documentation
    #[default]
    Manual,
    /// Beginner-friendly step-by-step tutorial
    Tutorial,
    /// API-reference oriented documentation
    Api,
    /// Inline-comment style explanations
    Comment,
    /// Deep architectural analysis
    Insight,
}

impl DocStyle {
    /// Maximum number of files embedded in a project prompt
    pub fn max_files(self) -> usize {
        match self {
            Self::Manual => MANUAL_MAX_FILES,
            Self::Comment => COMMENT_MAX_FILES,
            Self::Tutorial | Self::Api | Self::Insight => DEFAULT_MAX_FILES,
        }
    }

    /// Character budget per embedded file
    pub fn file_char_budget(self) -> usize {
        match self {
            Self::Manual => MANUAL_FILE_CHARS,
            _ => DEFAULT_FILE_CHARS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Tutorial => "tutorial",
            Self::Api => "api",
            Self::Comment => "comment",
            Self::Insight => "insight",
        }
    }
}

/// Where the project came from; adjusts prompt wording for repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectKind {
    #[default]
    Upload,
    Repository,
}

/// Everything the project prompt is assembled from
#[derive(Debug)]
pub struct PromptRequest<'a> {
    pub files: &'a FileMapping,
    pub summary: &'a ProjectSummary,
    pub project_name: &'a str,
    pub kind: ProjectKind,
    pub language: OutputLanguage,
    pub style: DocStyle,
}

// =============================================================================
// System Prompts
// =============================================================================

/// Role message for the LLM, varying by output language and batch mode
pub fn system_prompt(language: OutputLanguage, batch: bool) -> &'static str {
    match (language, batch) {
        (OutputLanguage::English, true) => {
            "You are a professional software architect and documentation expert. \
             Analyze the entire project structure and generate comprehensive documentation."
        }
        (OutputLanguage::English, false) => {
            "You are a professional documentation generator AI. \
             Write clean, accurate, readable documentation."
        }
        (OutputLanguage::Chinese, true) => {
            "你是一个专业的软件架构师和技术文档专家，擅长分析整个项目结构并生成全面的技术文档。\
             请用中文回答，格式清晰易读。"
        }
        (OutputLanguage::Chinese, false) => {
            "你是一个专业的技术文档编写专家，擅长为各种编程语言的代码生成清晰、全面、实用的技术文档。\
             请用中文回答，并且格式要清晰易读。"
        }
    }
}

// =============================================================================
// Project Prompts
// =============================================================================

/// Build the instruction document for a whole-project request.
pub fn build_project_prompt(request: &PromptRequest<'_>) -> String {
    let overview = project_overview(request);
    let files = format_files(request.files, request.style, request.language);
    let instructions = style_instructions(request);

    format!("{}\n{}\n{}", overview, files, instructions)
}

fn project_noun(kind: ProjectKind, language: OutputLanguage) -> &'static str {
    match (kind, language) {
        (ProjectKind::Repository, OutputLanguage::English) => "GitHub repository",
        (ProjectKind::Upload, OutputLanguage::English) => "project",
        (ProjectKind::Repository, OutputLanguage::Chinese) => "GitHub仓库",
        (ProjectKind::Upload, OutputLanguage::Chinese) => "项目",
    }
}

fn project_overview(request: &PromptRequest<'_>) -> String {
    let summary = request.summary;
    let noun = project_noun(request.kind, request.language);
    let directories = if summary.directories.is_empty() {
        "(none)".to_string()
    } else {
        summary.directories.join(", ")
    };
    let entry_points = if summary.entry_points.is_empty() {
        "(none detected)".to_string()
    } else {
        summary.entry_points.join(", ")
    };
    let config_files = if summary.config_files.is_empty() {
        "(none)".to_string()
    } else {
        summary.config_files.join(", ")
    };

    match request.language {
        OutputLanguage::English => format!(
            "Generate documentation for the {noun} \"{name}\".\n\n\
             Project analysis:\n\
             - Total files: {total}\n\
             - Languages: {languages}\n\
             - Top-level directories: {directories}\n\
             - Entry-point files: {entry_points}\n\
             - Config files: {config_files}\n\
             - Test files: {tests}\n",
            noun = noun,
            name = request.project_name,
            total = summary.total_files,
            languages = summary.language_overview(),
            directories = directories,
            entry_points = entry_points,
            config_files = config_files,
            tests = summary.test_files.len(),
        ),
        OutputLanguage::Chinese => format!(
            "请为{noun} \"{name}\" 生成技术文档。\n\n\
             项目分析概况:\n\
             - 文件总数: {total}\n\
             - 编程语言分布: {languages}\n\
             - 主要目录: {directories}\n\
             - 核心文件: {entry_points}\n\
             - 配置文件: {config_files}\n\
             - 测试文件: {tests}个\n",
            noun = noun,
            name = request.project_name,
            total = summary.total_files,
            languages = summary.language_overview(),
            directories = directories,
            entry_points = entry_points,
            config_files = config_files,
            tests = summary.test_files.len(),
        ),
    }
}

/// Embed up to the style's file cap, truncating each to its char budget,
/// and append a note of how many files were omitted.
fn format_files(files: &FileMapping, style: DocStyle, language: OutputLanguage) -> String {
    let max_files = style.max_files();
    let budget = style.file_char_budget();

    let mut out = match language {
        OutputLanguage::English => String::from("\nFiles to analyze:\n"),
        OutputLanguage::Chinese => String::from("\n需要分析的文件内容:\n"),
    };

    for (path, content) in files.iter().take(max_files) {
        let (snippet, truncated) = truncate_chars(content, budget);
        let marker = match (truncated, language) {
            (false, _) => "",
            (true, OutputLanguage::English) => "\n...(truncated)",
            (true, OutputLanguage::Chinese) => "\n...(内容过长已截断)",
        };
        let label = match language {
            OutputLanguage::English => "File",
            OutputLanguage::Chinese => "文件",
        };
        out.push_str(&format!(
            "\n**{}: {}**\n```\n{}{}\n```\n",
            label, path, snippet, marker
        ));
    }

    if files.len() > max_files {
        let omitted = files.len() - max_files;
        out.push_str(&match language {
            OutputLanguage::English => format!("\n({} more files not shown)\n", omitted),
            OutputLanguage::Chinese => format!("\n（还有 {} 个文件未完全显示）\n", omitted),
        });
    }

    out
}

fn style_instructions(request: &PromptRequest<'_>) -> String {
    let noun = project_noun(request.kind, request.language);
    match (request.style, request.language) {
        (DocStyle::Manual, OutputLanguage::English) => format!(
            "\nGenerate documentation in Markdown including:\n\
             - Project Overview\n\
             - Architecture Analysis\n\
             - Key Components\n\
             - File Structure\n\
             - Dependencies\n\
             - Usage Instructions\n{}",
            match request.kind {
                ProjectKind::Repository =>
                    "- Quick Start (how to clone and run)\n- Contribution Guide\n",
                ProjectKind::Upload => "",
            }
        ),
        (DocStyle::Manual, OutputLanguage::Chinese) => format!(
            "\n请生成全面的{noun}技术文档，包括：项目概述、项目架构、目录结构、\
             核心组件分析、使用建议、注意事项、依赖关系和优化建议。\
             请确保文档详细、准确，并提供实用的分析和建议。\n"
        ),
        (DocStyle::Tutorial, OutputLanguage::English) => format!(
            "\nWrite a step-by-step tutorial explaining how this {noun} works, \
             suitable for beginners: introduction, environment setup, code \
             walkthrough, and how to run it.\n"
        ),
        (DocStyle::Tutorial, OutputLanguage::Chinese) => format!(
            "\n请生成适合初学者的{noun}中文教程，包括项目介绍、环境搭建、\
             代码解析、运行步骤等，适合初学者理解。\n"
        ),
        (DocStyle::Api, OutputLanguage::English) => String::from(
            "\nFocus on endpoints, functions, and classes that can be used as \
             APIs. Include parameters, return values, and usage examples.\n",
        ),
        (DocStyle::Api, OutputLanguage::Chinese) => String::from(
            "\n重点分析可作为API使用的接口、函数、类，包括参数说明、返回值、使用示例等。\n",
        ),
        (DocStyle::Comment, OutputLanguage::English) => String::from(
            "\nProvide detailed comment-style explanations for the code logic \
             and structure without changing the original structure.\n",
        ),
        (DocStyle::Comment, OutputLanguage::Chinese) => String::from(
            "\n请为关键代码添加中文注释说明，解释逻辑和实现思路，避免改动代码结构。\n",
        ),
        (DocStyle::Insight, OutputLanguage::English) => String::from(
            "\nAnalyze architecture, performance, and scalability, and provide \
             optimization and refactoring suggestions. Be as detailed and \
             professional as possible.\n",
        ),
        (DocStyle::Insight, OutputLanguage::Chinese) => String::from(
            "\n请从架构、性能、可扩展性等角度进行深入分析，并提供优化建议和重构思路。\
             分析要尽可能详细和专业。\n",
        ),
    }
}

// =============================================================================
// Single-File Prompts
// =============================================================================

/// Build the instruction document for a single (filename, content) pair.
/// The code language is classified from the filename's extension.
pub fn build_single_file_prompt(
    filename: &str,
    content: &str,
    language: OutputLanguage,
    style: DocStyle,
) -> String {
    let code_language = language_for_path(filename);
    let task = match (style, language) {
        (DocStyle::Manual, OutputLanguage::English) => format!(
            "Generate full technical documentation for the following {code_language} code \
             in Markdown format: overview, architecture, functions and methods \
             (name, params, return, usage), classes, best practices, and external \
             dependencies."
        ),
        (DocStyle::Manual, OutputLanguage::Chinese) => format!(
            "请为以下{code_language}代码生成全面的中文技术文档，包含概述、整体架构、\
             函数/方法详解、类详解、使用建议、注意事项和依赖关系。"
        ),
        (DocStyle::Tutorial, OutputLanguage::English) => format!(
            "Write a beginner-friendly tutorial for the following {code_language} code. \
             Explain each function/module in plain English, with practical use-cases, \
             step-by-step guidance, and example usages."
        ),
        (DocStyle::Tutorial, OutputLanguage::Chinese) => format!(
            "请为以下{code_language}代码生成适合初学者的中文教程，\
             要求包含每个函数/模块的详细解释、使用步骤、用途说明和使用示例。"
        ),
        (DocStyle::Api, OutputLanguage::English) => format!(
            "Generate RESTful API style documentation for the following {code_language} code. \
             Include endpoint descriptions, parameters, request/response examples, \
             and status codes if applicable."
        ),
        (DocStyle::Api, OutputLanguage::Chinese) => format!(
            "请为以下{code_language}代码生成 RESTful 风格的中文 API 文档，\
             包括接口描述、参数说明、请求/响应示例及状态码（如适用）。"
        ),
        (DocStyle::Comment, OutputLanguage::English) => format!(
            "Add inline comments to the following {code_language} code to explain the \
             logic clearly. Avoid changing the original structure."
        ),
        (DocStyle::Comment, OutputLanguage::Chinese) => format!(
            "请为以下{code_language}代码添加中文注释，解释每个关键步骤的作用，\
             避免改动代码结构。"
        ),
        (DocStyle::Insight, OutputLanguage::English) => format!(
            "Provide a deep architecture-level analysis and optimization suggestions for \
             the following {code_language} code. Explain performance trade-offs, \
             scalability, and refactoring opportunities."
        ),
        (DocStyle::Insight, OutputLanguage::Chinese) => format!(
            "请对以下{code_language}代码从架构层面进行深入分析，并提出性能优化、\
             可扩展性建议及重构思路。"
        ),
    };

    let (file_label, lang_label, code_label) = match language {
        OutputLanguage::English => ("Filename", "Language", "Code"),
        OutputLanguage::Chinese => ("文件名", "语言", "代码"),
    };

    format!(
        "{task}\n\n{file_label}: {filename}\n{lang_label}: {code_language}\n\n{code_label}:\n{content}\n"
    )
}

/// Char-safe prefix truncation; returns the snippet and whether it was cut
fn truncate_chars(content: &str, budget: usize) -> (String, bool) {
    if content.chars().count() <= budget {
        (content.to_string(), false)
    } else {
        (content.chars().take(budget).collect(), true)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ProjectSummary;

    fn mapping(entries: &[(&str, &str)]) -> FileMapping {
        entries
            .iter()
            .map(|(path, content)| (path.to_string(), content.to_string()))
            .collect()
    }

    fn request<'a>(
        files: &'a FileMapping,
        summary: &'a ProjectSummary,
        style: DocStyle,
    ) -> PromptRequest<'a> {
        PromptRequest {
            files,
            summary,
            project_name: "demo",
            kind: ProjectKind::Upload,
            language: OutputLanguage::English,
            style,
        }
    }

    #[test]
    fn test_style_budgets() {
        assert_eq!(DocStyle::Manual.max_files(), 10);
        assert_eq!(DocStyle::Tutorial.max_files(), 8);
        assert_eq!(DocStyle::Comment.max_files(), 6);
        assert_eq!(DocStyle::Manual.file_char_budget(), 1000);
        assert_eq!(DocStyle::Insight.file_char_budget(), 800);
    }

    #[test]
    fn test_project_prompt_contains_analysis() {
        let files = mapping(&[("main.py", "print('x')")]);
        let summary = ProjectSummary::analyze(&files);
        let prompt = build_project_prompt(&request(&files, &summary, DocStyle::Manual));

        assert!(prompt.contains("\"demo\""));
        assert!(prompt.contains("Total files: 1"));
        assert!(prompt.contains("Python(1)"));
        assert!(prompt.contains("**File: main.py**"));
    }

    #[test]
    fn test_omitted_files_note() {
        let entries: Vec<(String, String)> = (0..9)
            .map(|i| (format!("f{}.py", i), format!("x = {}", i)))
            .collect();
        let files: FileMapping = entries.into_iter().collect();
        let summary = ProjectSummary::analyze(&files);
        let prompt = build_project_prompt(&request(&files, &summary, DocStyle::Tutorial));

        // Tutorial embeds 8 of 9 files.
        assert!(prompt.contains("(1 more files not shown)"));
        assert!(!prompt.contains("**File: f8.py**"));
    }

    #[test]
    fn test_file_truncation_marker() {
        let long = "a".repeat(2000);
        let files = mapping(&[("big.py", &long)]);
        let summary = ProjectSummary::analyze(&files);
        let prompt = build_project_prompt(&request(&files, &summary, DocStyle::Manual));

        assert!(prompt.contains("...(truncated)"));
        assert!(!prompt.contains(&long));
    }

    #[test]
    fn test_repository_wording() {
        let files = mapping(&[("main.py", "x")]);
        let summary = ProjectSummary::analyze(&files);
        let mut req = request(&files, &summary, DocStyle::Manual);
        req.kind = ProjectKind::Repository;
        let prompt = build_project_prompt(&req);

        assert!(prompt.contains("GitHub repository"));
        assert!(prompt.contains("Quick Start"));
    }

    #[test]
    fn test_single_file_prompt_classifies_language() {
        let prompt = build_single_file_prompt(
            "util.rs",
            "pub fn x() {}",
            OutputLanguage::English,
            DocStyle::Manual,
        );
        assert!(prompt.contains("Rust"));
        assert!(prompt.contains("Filename: util.rs"));
        assert!(prompt.contains("pub fn x() {}"));
    }

    #[test]
    fn test_chinese_system_prompt() {
        assert!(system_prompt(OutputLanguage::Chinese, true).contains("中文"));
        assert!(system_prompt(OutputLanguage::English, false).contains("documentation"));
    }

    #[test]
    fn test_truncate_chars_is_char_safe() {
        let (snippet, truncated) = truncate_chars("héllo wörld", 5);
        assert!(truncated);
        assert_eq!(snippet, "héllo");
    }
}
