use relative_path::{RelativePath, RelativePathBuf};

pub const ARTICLE_EXTENSION: &str = ".json";
pub const COMMENTS_SUFFIX: &str = ".comments.json";

/// An article file under the notes directory.
///
/// The first directory is the notebook, any directories below it are nested
/// categories: `work/projects/alpha/kickoff.json` is the article `kickoff` in
/// notebook `work`, categories `projects / alpha`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArticleFile {
    relative_path: RelativePathBuf,
    display_name: String,
    display_path: String,
}

impl ArticleFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = Self::extract_display_name(&relative_path);
        let display_path = {
            let path_str = relative_path.as_str();
            path_str
                .strip_suffix(ARTICLE_EXTENSION)
                .unwrap_or(path_str)
                .to_string()
        };

        Self {
            relative_path,
            display_name,
            display_path,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without the extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Relative path without the extension, used in titles
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    /// Top-level directory, if the article is inside one
    pub fn notebook(&self) -> Option<&str> {
        let dirs = self.directories();
        dirs.first().copied()
    }

    /// Directories between the notebook and the file
    pub fn categories(&self) -> Vec<&str> {
        self.directories().into_iter().skip(1).collect()
    }

    /// Sidecar file holding this article's comments
    pub fn comments_path(&self) -> RelativePathBuf {
        RelativePathBuf::from(format!("{}{COMMENTS_SUFFIX}", self.display_path))
    }

    /// Whether a file name looks like an article (and not a comments sidecar)
    pub fn is_article_name(name: &str) -> bool {
        name.ends_with(ARTICLE_EXTENSION) && !name.ends_with(COMMENTS_SUFFIX)
    }

    fn directories(&self) -> Vec<&str> {
        self.relative_path
            .parent()
            .map(|parent| parent.components().map(|c| c.as_str()).collect())
            .unwrap_or_default()
    }

    fn extract_display_name(path: &RelativePath) -> String {
        path.file_name()
            .map(|name| name.strip_suffix(ARTICLE_EXTENSION).unwrap_or(name))
            .unwrap_or("Untitled")
            .to_string()
    }
}

impl From<RelativePathBuf> for ArticleFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for ArticleFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_nested_article() {
        let file = ArticleFile::from("work/projects/alpha/kickoff.json");
        assert_eq!(file.display_name(), "kickoff");
        assert_eq!(file.display_path(), "work/projects/alpha/kickoff");
        assert_eq!(file.notebook(), Some("work"));
        assert_eq!(file.categories(), vec!["projects", "alpha"]);
        assert_eq!(
            file.comments_path(),
            RelativePathBuf::from("work/projects/alpha/kickoff.comments.json")
        );
    }

    #[test]
    fn test_top_level_article_has_no_notebook() {
        let file = ArticleFile::from("scratch.json");
        assert_eq!(file.notebook(), None);
        assert!(file.categories().is_empty());
    }

    #[rstest]
    #[case("note.json", true)]
    #[case("note.comments.json", false)]
    #[case("note.md", false)]
    fn test_is_article_name(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(ArticleFile::is_article_name(name), expected);
    }
}
