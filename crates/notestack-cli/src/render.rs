//! Plain-text rendering of block surfaces for the terminal viewer.

use notestack_engine::blocks::ListStyle;
use notestack_engine::view::EmbedKind;
use notestack_engine::{BlockView, Surface};

/// Text lines for a whole article, one blank line between blocks
pub fn document_lines(views: &[BlockView]) -> Vec<String> {
    let mut lines = Vec::new();
    for view in views {
        let block = surface_lines(&view.surface);
        if block.is_empty() {
            continue;
        }
        lines.extend(block);
        lines.push(String::new());
    }
    lines
}

pub fn surface_lines(surface: &Surface) -> Vec<String> {
    match surface {
        Surface::Paragraph { text, .. } => text.lines().map(str::to_string).collect(),
        Surface::Heading { level, text, .. } => {
            vec![format!("{} {text}", "#".repeat(*level as usize))]
        }
        Surface::List { style, items, .. } => items
            .iter()
            .enumerate()
            .map(|(index, item)| match style {
                ListStyle::Ordered => format!("{}. {item}", index + 1),
                ListStyle::Unordered => format!("• {item}"),
            })
            .collect(),
        Surface::Quote { text, caption, .. } => {
            let mut lines: Vec<String> = text.lines().map(|line| format!("> {line}")).collect();
            if !caption.is_empty() {
                lines.push(format!(">   ~ {caption}"));
            }
            lines
        }
        Surface::Delimiter => vec!["* * *".to_string()],
        Surface::Code(code) => {
            let mut lines = vec![format!("```{}", code.language.id())];
            lines.extend(code.code.lines().map(str::to_string));
            lines.push("```".to_string());
            lines
        }
        Surface::Table {
            with_headings,
            content,
            ..
        } => table_lines(*with_headings, content),
        Surface::Image {
            src,
            caption,
            loading,
            ..
        } => {
            let label = if *loading {
                "[image loading]"
            } else if src.is_some() {
                "[image]"
            } else {
                "[image not set]"
            };
            if caption.is_empty() {
                vec![label.to_string()]
            } else {
                vec![format!("{label} {caption}")]
            }
        }
        Surface::LinkInput { pending_url, .. } => match pending_url {
            Some(url) => vec![format!("[fetching preview for {url}]")],
            None => vec!["[link preview without a URL]".to_string()],
        },
        Surface::LinkCard {
            url,
            title,
            description,
            ..
        } => {
            let mut lines = vec![format!("🔗 {title}")];
            if !description.is_empty() {
                lines.push(format!("   {description}"));
            }
            lines.push(format!("   {url}"));
            lines
        }
        Surface::Embed {
            kind, title, url, ..
        } => {
            let kind = match kind {
                EmbedKind::Webview => "webview",
                EmbedKind::Mega => "mega",
                EmbedKind::Audio => "audio",
            };
            match title.as_deref().filter(|title| !title.is_empty()) {
                Some(title) => vec![format!("[{kind}] {title}: {url}")],
                None => vec![format!("[{kind}] {url}")],
            }
        }
        Surface::Empty => Vec::new(),
        Surface::Error {
            block_type,
            message,
        } => vec![format!("[{block_type} block unavailable] {message}")],
    }
}

fn table_lines(with_headings: bool, content: &[Vec<String>]) -> Vec<String> {
    let width = content.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; width];
    for row in content {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let format_row = |row: &Vec<String>| {
        let cells: Vec<String> = (0..width)
            .map(|col| {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                format!("{cell:<w$}", w = widths[col])
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(content.len() + 1);
    for (index, row) in content.iter().enumerate() {
        lines.push(format_row(row));
        if with_headings && index == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            lines.push(format!("|-{}-|", rule.join("-|-")));
        }
    }
    lines
}
