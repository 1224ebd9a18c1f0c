use crate::layout::error::LayoutError;

/// The page-width budget a render tries to respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageWidth {
    /// Maximum characters per line, indentation included.
    pub width: usize,

    /// Fraction of `width` available to non-indentation characters, in
    /// `(0, 1]`. The resulting budget is known as the ribbon.
    pub ribbon_ratio: f64,
}

impl Default for PageWidth {
    fn default() -> PageWidth {
        PageWidth {
            width: 80,
            ribbon_ratio: 1.0,
        }
    }
}

impl PageWidth {
    pub fn new(width: usize) -> PageWidth {
        PageWidth {
            width,
            ..PageWidth::default()
        }
    }
}

/// Which interpreter lays the document out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Stack-driven interpreter with one-line lookahead: at every choice
    /// the first branch wins unless it overflows the current line.
    #[default]
    Default,

    /// Direct tree walk with no choice resolution and no indentation;
    /// suited to machine-readable output.
    Simple,

    /// Like [`LayoutMode::Default`], but lookahead extends across aligned
    /// blocks, at the cost of unbounded buffering inside them.
    Smart,
}

/// Configuration for a render.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Width budget; `None` lays everything out on as few lines as the
    /// document allows.
    pub page_width: Option<PageWidth>,

    pub layout_mode: LayoutMode,

    /// Indent amount applied by [`nest_default`](crate::nest_default).
    pub default_nesting: usize,

    /// When set, whitespace with no text after it on the same line is
    /// dropped at commit time.
    pub strip_trailing_whitespace: bool,
}

impl Default for LayoutOptions {
    fn default() -> LayoutOptions {
        LayoutOptions {
            page_width: Some(PageWidth::default()),
            layout_mode: LayoutMode::default(),
            default_nesting: 4,
            strip_trailing_whitespace: true,
        }
    }
}

impl LayoutOptions {
    /// Default options at the given page width.
    pub fn with_width(width: usize) -> LayoutOptions {
        LayoutOptions {
            page_width: Some(PageWidth::new(width)),
            ..LayoutOptions::default()
        }
    }

    /// Default options with no page-width budget.
    pub fn unbounded() -> LayoutOptions {
        LayoutOptions {
            page_width: None,
            ..LayoutOptions::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        if let Some(page_width) = self.page_width {
            let ratio = page_width.ribbon_ratio;
            if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
                return Err(LayoutError::InvalidOptions(format!(
                    "ribbon ratio must be within (0, 1], got {ratio}"
                )));
            }
        }
        Ok(())
    }
}
