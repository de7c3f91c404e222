use serde::{Deserialize, Serialize};

/// Languages offered by the code block's language selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "bat")]
    Batch,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "cpp")]
    Cpp,
    #[serde(rename = "csharp")]
    CSharp,
    #[serde(rename = "css")]
    Css,
    #[serde(rename = "dockerfile")]
    Dockerfile,
    #[serde(rename = "fsharp")]
    FSharp,
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "graphql")]
    GraphQl,
    #[serde(rename = "handlebars")]
    Handlebars,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "java")]
    Java,
    #[default]
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "julia")]
    Julia,
    #[serde(rename = "kotlin")]
    Kotlin,
    #[serde(rename = "less")]
    Less,
    #[serde(rename = "lua")]
    Lua,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "objective-c")]
    ObjectiveC,
    #[serde(rename = "pascal")]
    Pascal,
    #[serde(rename = "perl")]
    Perl,
    #[serde(rename = "php")]
    Php,
    #[serde(rename = "plaintext")]
    PlainText,
    #[serde(rename = "powershell")]
    PowerShell,
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "r")]
    R,
    #[serde(rename = "razor")]
    Razor,
    #[serde(rename = "ruby")]
    Ruby,
    #[serde(rename = "rust")]
    Rust,
    #[serde(rename = "scss")]
    Scss,
    #[serde(rename = "shell", alias = "sh")]
    Shell,
    #[serde(rename = "sql")]
    Sql,
    #[serde(rename = "swift")]
    Swift,
    #[serde(rename = "typescript")]
    TypeScript,
    #[serde(rename = "vb")]
    VisualBasic,
    #[serde(rename = "xml")]
    Xml,
    #[serde(rename = "yaml")]
    Yaml,
}

impl Language {
    pub const ALL: &'static [Language] = &[
        Language::Batch,
        Language::C,
        Language::Cpp,
        Language::CSharp,
        Language::Css,
        Language::Dockerfile,
        Language::FSharp,
        Language::Go,
        Language::GraphQl,
        Language::Handlebars,
        Language::Html,
        Language::Java,
        Language::JavaScript,
        Language::Json,
        Language::Julia,
        Language::Kotlin,
        Language::Less,
        Language::Lua,
        Language::Markdown,
        Language::ObjectiveC,
        Language::Pascal,
        Language::Perl,
        Language::Php,
        Language::PlainText,
        Language::PowerShell,
        Language::Python,
        Language::R,
        Language::Razor,
        Language::Ruby,
        Language::Rust,
        Language::Scss,
        Language::Shell,
        Language::Sql,
        Language::Swift,
        Language::TypeScript,
        Language::VisualBasic,
        Language::Xml,
        Language::Yaml,
    ];

    /// Identifier persisted in block data and handed to the code widget
    pub fn id(&self) -> &'static str {
        match self {
            Language::Batch => "bat",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Css => "css",
            Language::Dockerfile => "dockerfile",
            Language::FSharp => "fsharp",
            Language::Go => "go",
            Language::GraphQl => "graphql",
            Language::Handlebars => "handlebars",
            Language::Html => "html",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Json => "json",
            Language::Julia => "julia",
            Language::Kotlin => "kotlin",
            Language::Less => "less",
            Language::Lua => "lua",
            Language::Markdown => "markdown",
            Language::ObjectiveC => "objective-c",
            Language::Pascal => "pascal",
            Language::Perl => "perl",
            Language::Php => "php",
            Language::PlainText => "plaintext",
            Language::PowerShell => "powershell",
            Language::Python => "python",
            Language::R => "r",
            Language::Razor => "razor",
            Language::Ruby => "ruby",
            Language::Rust => "rust",
            Language::Scss => "scss",
            Language::Shell => "shell",
            Language::Sql => "sql",
            Language::Swift => "swift",
            Language::TypeScript => "typescript",
            Language::VisualBasic => "vb",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
        }
    }

    /// Human-readable name for the selector
    pub fn label(&self) -> &'static str {
        match self {
            Language::Batch => "Batch",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Css => "CSS",
            Language::Dockerfile => "Dockerfile",
            Language::FSharp => "F#",
            Language::Go => "Go",
            Language::GraphQl => "GraphQL",
            Language::Handlebars => "Handlebars",
            Language::Html => "HTML",
            Language::Java => "Java",
            Language::JavaScript => "JavaScript",
            Language::Json => "JSON",
            Language::Julia => "Julia",
            Language::Kotlin => "Kotlin",
            Language::Less => "Less",
            Language::Lua => "Lua",
            Language::Markdown => "Markdown",
            Language::ObjectiveC => "Objective-C",
            Language::Pascal => "Pascal",
            Language::Perl => "Perl",
            Language::Php => "PHP",
            Language::PlainText => "Plain Text",
            Language::PowerShell => "PowerShell",
            Language::Python => "Python",
            Language::R => "R",
            Language::Razor => "Razor (CSHTML)",
            Language::Ruby => "Ruby",
            Language::Rust => "Rust",
            Language::Scss => "SCSS",
            Language::Shell => "Shell Script",
            Language::Sql => "SQL",
            Language::Swift => "Swift",
            Language::TypeScript => "TypeScript",
            Language::VisualBasic => "VB.NET",
            Language::Xml => "XML",
            Language::Yaml => "YAML",
        }
    }

    pub fn from_id(id: &str) -> Option<Language> {
        match id {
            "sh" => Some(Language::Shell),
            _ => Self::ALL.iter().copied().find(|language| language.id() == id),
        }
    }
}
