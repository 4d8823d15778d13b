//! Human-readable dumps of a view-model tree.
//!
//! [`ViewModelTreeDebug`] renders the title, list-level header and footer,
//! sections and rows of a [`TableViewModel`] for logs and test failures.
//!
//! ```text
//! Settings
//! ├── header: banner
//! ├── section 0 (2 rows)
//! │   ├── header: title
//! │   ├── [0, 0] toggle (selectable)
//! │   └── [0, 1] label
//! └── section 1 (1 row)
//!     └── [1, 0] x1
//! ```

use std::fmt::{self, Write as _};

use super::index::IndexPath;
use super::traits::{SectionViewModelRef, TableViewModel, ViewModelRef};

/// Style options for tree output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Everything on a single line.
    Compact,
}

/// Configuration for tree output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to mark selectable rows.
    pub show_selectable: bool,
    /// Whether to show headers and footers.
    pub show_supplements: bool,
    /// Maximum rows listed per section (None for unlimited).
    pub max_rows: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_selectable: true,
            show_supplements: true,
            max_rows: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for a bare structural dump.
    pub fn minimal() -> Self {
        Self {
            show_selectable: false,
            show_supplements: false,
            ..Default::default()
        }
    }

    /// Sets the style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }
}

/// Formats view-model trees.
#[derive(Debug, Clone, Default)]
pub struct ViewModelTreeDebug {
    options: TreeFormatOptions,
}

impl ViewModelTreeDebug {
    /// Creates a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Formats `model` into a string.
    pub fn format<M: TableViewModel + ?Sized>(&self, model: &M) -> String {
        self.display(model).to_string()
    }

    /// Returns a value that formats `model` when displayed.
    ///
    /// Useful as a lazy `tracing` field: `tracing::debug!(tree = %debug.display(&*model))`.
    pub fn display<'a, M: TableViewModel + ?Sized>(&'a self, model: &'a M) -> TreeDisplay<'a, M> {
        TreeDisplay {
            options: &self.options,
            model,
        }
    }
}

/// A view-model tree bound to its format options.
pub struct TreeDisplay<'a, M: ?Sized> {
    options: &'a TreeFormatOptions,
    model: &'a M,
}

impl<M: TableViewModel + ?Sized> fmt::Display for TreeDisplay<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.model.title();
        let title = title.as_deref().unwrap_or("(untitled)");
        let sections = self.model.sections();

        if self.options.style == TreeStyle::Compact {
            return self.fmt_compact(f, title, &sections);
        }

        writeln!(f, "{title}")?;

        let header = self.supplement(self.model.header());
        let footer = self.supplement(self.model.footer());
        let top_level = header.is_some() as usize + sections.len() + footer.is_some() as usize;
        let mut written = 0;
        let mut next_is_last = || {
            written += 1;
            written == top_level
        };

        if let Some(header) = &header {
            self.line(f, &[], next_is_last(), format_args!("header: {}", header.kind()))?;
        }
        for (index, section) in sections.iter().enumerate() {
            let is_last = next_is_last();
            self.fmt_section(f, index, section, is_last)?;
        }
        if let Some(footer) = &footer {
            self.line(f, &[], next_is_last(), format_args!("footer: {}", footer.kind()))?;
        }
        Ok(())
    }
}

impl<M: TableViewModel + ?Sized> TreeDisplay<'_, M> {
    fn supplement(&self, view_model: Option<ViewModelRef>) -> Option<ViewModelRef> {
        view_model.filter(|_| self.options.show_supplements)
    }

    fn fmt_section(
        &self,
        f: &mut fmt::Formatter<'_>,
        index: usize,
        section: &SectionViewModelRef,
        is_last: bool,
    ) -> fmt::Result {
        let rows = section.rows();
        let plural = if rows.len() == 1 { "row" } else { "rows" };
        self.line(
            f,
            &[],
            is_last,
            format_args!("section {index} ({} {plural})", rows.len()),
        )?;

        let ancestors = [is_last];
        let header = self.supplement(section.header());
        let footer = self.supplement(section.footer());
        let shown = self.options.max_rows.map_or(rows.len(), |max| max.min(rows.len()));
        let hidden = rows.len() - shown;
        let children = header.is_some() as usize + shown + (hidden > 0) as usize + footer.is_some() as usize;
        let mut written = 0;
        let mut next_is_last = || {
            written += 1;
            written == children
        };

        if let Some(header) = &header {
            self.line(f, &ancestors, next_is_last(), format_args!("header: {}", header.kind()))?;
        }
        for (row_index, row) in rows.iter().take(shown).enumerate() {
            let path = IndexPath::new(index, row_index);
            let marker = if self.options.show_selectable && row.is_selectable() {
                " (selectable)"
            } else {
                ""
            };
            self.line(
                f,
                &ancestors,
                next_is_last(),
                format_args!("{path} {}{marker}", row.kind()),
            )?;
        }
        if hidden > 0 {
            self.line(f, &ancestors, next_is_last(), format_args!("... {hidden} more"))?;
        }
        if let Some(footer) = &footer {
            self.line(f, &ancestors, next_is_last(), format_args!("footer: {}", footer.kind()))?;
        }
        Ok(())
    }

    /// Writes one node line below the title, `ancestors` holding whether each
    /// enclosing node was the last of its siblings.
    fn line(
        &self,
        f: &mut fmt::Formatter<'_>,
        ancestors: &[bool],
        is_last: bool,
        text: fmt::Arguments<'_>,
    ) -> fmt::Result {
        let (pipe, blank, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|   ", "    ", "+-- ", "`-- "),
            _ => ("\u{2502}   ", "    ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        };
        for &ancestor_is_last in ancestors {
            f.write_str(if ancestor_is_last { blank } else { pipe })?;
        }
        f.write_str(if is_last { corner } else { tee })?;
        f.write_fmt(text)?;
        f.write_char('\n')
    }

    fn fmt_compact(
        &self,
        f: &mut fmt::Formatter<'_>,
        title: &str,
        sections: &[SectionViewModelRef],
    ) -> fmt::Result {
        write!(f, "{title} {{")?;
        let mut first = true;
        let mut separator = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            f.write_str(if first { " " } else { "; " })?;
            first = false;
            Ok(())
        };

        if let Some(header) = self.supplement(self.model.header()) {
            separator(f)?;
            write!(f, "header: {}", header.kind())?;
        }
        for (index, section) in sections.iter().enumerate() {
            separator(f)?;
            write!(f, "section {index} [")?;
            let rows = section.rows();
            let shown = self.options.max_rows.map_or(rows.len(), |max| max.min(rows.len()));
            for (row_index, row) in rows.iter().take(shown).enumerate() {
                if row_index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", row.kind())?;
                if self.options.show_selectable && row.is_selectable() {
                    f.write_char('*')?;
                }
            }
            if shown < rows.len() {
                write!(f, ", ... {} more", rows.len() - shown)?;
            }
            f.write_char(']')?;
        }
        if let Some(footer) = self.supplement(self.model.footer()) {
            separator(f)?;
            write!(f, "footer: {}", footer.kind())?;
        }
        f.write_str(" }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CellViewModelRef, SimpleCellViewModel, SimpleSectionViewModel, SimpleTableViewModel,
    };
    use std::sync::Arc;

    fn cell(kind: &'static str, selectable: bool) -> CellViewModelRef {
        Arc::new(SimpleCellViewModel::new(kind, selectable))
    }

    fn settings() -> SimpleTableViewModel {
        SimpleTableViewModel::new()
            .with_title("Settings")
            .with_header(cell("banner", false))
            .with_sections(vec![
                Arc::new(
                    SimpleSectionViewModel::new(vec![cell("toggle", true), cell("label", false)])
                        .with_header(cell("title", false)),
                ) as SectionViewModelRef,
                Arc::new(SimpleSectionViewModel::new(vec![cell("x1", false)])) as SectionViewModelRef,
            ])
    }

    #[test]
    fn test_unicode_tree() {
        let output = ViewModelTreeDebug::new().format(&settings());
        let expected = "\
Settings
├── header: banner
├── section 0 (2 rows)
│   ├── header: title
│   ├── [0, 0] toggle (selectable)
│   └── [0, 1] label
└── section 1 (1 row)
    └── [1, 0] x1
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_ascii_minimal_tree() {
        let options = TreeFormatOptions::minimal().with_style(TreeStyle::Ascii);
        let output = ViewModelTreeDebug::with_options(options).format(&settings());
        let expected = "\
Settings
+-- section 0 (2 rows)
|   +-- [0, 0] toggle
|   `-- [0, 1] label
`-- section 1 (1 row)
    `-- [1, 0] x1
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_compact_tree() {
        let options = TreeFormatOptions::default().with_style(TreeStyle::Compact);
        let output = ViewModelTreeDebug::with_options(options).format(&settings());
        assert_eq!(
            output,
            "Settings { header: banner; section 0 [toggle*, label]; section 1 [x1] }"
        );
    }

    #[test]
    fn test_max_rows() {
        let options = TreeFormatOptions {
            max_rows: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let output = ViewModelTreeDebug::with_options(options).format(&settings());
        assert!(output.contains("[0, 0] toggle\n"));
        assert!(output.contains("... 1 more"));
        assert!(!output.contains("label"));
    }

    #[test]
    fn test_empty_model() {
        let output = ViewModelTreeDebug::new().format(&SimpleTableViewModel::new());
        assert_eq!(output, "(untitled)\n");
    }
}
