use std::collections::BTreeMap;

use relative_path::{RelativePath, RelativePathBuf};

use super::ArticleFile;

/// In-memory index of discovered articles with incremental update support.
///
/// Uses BTreeMap for automatic sorted ordering by path, which also groups
/// articles by notebook and category.
#[derive(Debug, Default)]
pub struct ArticleIndex {
    articles: BTreeMap<RelativePathBuf, ArticleFile>,
}

impl ArticleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: ArticleFile) {
        self.articles
            .insert(file.relative_path().to_relative_path_buf(), file);
    }

    pub fn add_all(&mut self, files: impl IntoIterator<Item = ArticleFile>) {
        for file in files {
            self.add(file);
        }
    }

    /// All articles, sorted by path
    pub fn articles(&self) -> impl Iterator<Item = &ArticleFile> {
        self.articles.values()
    }

    /// Distinct notebook names in sorted order
    pub fn notebooks(&self) -> Vec<&str> {
        let mut notebooks: Vec<&str> = self.articles().filter_map(ArticleFile::notebook).collect();
        notebooks.sort_unstable();
        notebooks.dedup();
        notebooks
    }

    /// Articles inside `notebook`
    pub fn in_notebook<'a>(&'a self, notebook: &'a str) -> impl Iterator<Item = &'a ArticleFile> {
        self.articles()
            .filter(move |file| file.notebook() == Some(notebook))
    }

    pub fn get(&self, path: &RelativePath) -> Option<&ArticleFile> {
        self.articles.get(path)
    }

    pub fn remove(&mut self, path: &RelativePath) -> Option<ArticleFile> {
        self.articles.remove(path)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn clear(&mut self) {
        self.articles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(paths: &[&str]) -> ArticleIndex {
        let mut index = ArticleIndex::new();
        index.add_all(paths.iter().map(|path| ArticleFile::from(*path)));
        index
    }

    #[test]
    fn test_new_index_is_empty() {
        let index = ArticleIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_articles_sorted_by_path() {
        let index = index(&["z/last.json", "a/first.json", "m/middle.json"]);
        let paths: Vec<_> = index.articles().map(|f| f.display_path()).collect();
        assert_eq!(paths, vec!["a/first", "m/middle", "z/last"]);
    }

    #[test]
    fn test_notebooks_are_distinct() {
        let index = index(&[
            "work/a.json",
            "work/projects/b.json",
            "home/c.json",
            "loose.json",
        ]);
        assert_eq!(index.notebooks(), vec!["home", "work"]);

        let work: Vec<_> = index.in_notebook("work").map(|f| f.display_name()).collect();
        assert_eq!(work, vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_path_overwrites_and_remove() {
        let mut index = index(&["a.json", "a.json", "b.json"]);
        assert_eq!(index.len(), 2);

        let removed = index.remove(RelativePath::new("a.json"));
        assert_eq!(removed.map(|f| f.display_name().to_string()), Some("a".into()));
        assert!(index.remove(RelativePath::new("missing.json")).is_none());
        assert!(index.get(RelativePath::new("b.json")).is_some());

        index.clear();
        assert!(index.is_empty());
    }
}
