use std::fmt;
use std::rc::Rc;

use crate::layout::types::block::Block;

/// A sliced view into a shared backing string.
///
/// Text runs never own their characters; splitting a source string into
/// lines or words produces spans over a single reference-counted backing
/// buffer. A span never contains `'\n'`.
#[derive(Clone)]
pub(crate) struct Span {
    text: Rc<str>,
    start: usize,
    end: usize,
}

impl Span {
    pub(crate) fn new(text: Rc<str>, start: usize, end: usize) -> Span {
        debug_assert!(start <= end && end <= text.len());
        debug_assert!(!text[start..end].contains('\n'));
        Span { text, start, end }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text[self.start..self.end]
    }

    /// Printable width in characters, not bytes.
    pub(crate) fn width(&self) -> usize {
        self.as_str().chars().count()
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

/// A document: an immutable, persistent description of a set of possible
/// layouts.
///
/// Documents are cheaply cloneable (nodes are reference counted and shared
/// structurally) and are never mutated by rendering; the same document can
/// be rendered many times under different [`LayoutOptions`].
///
/// The type parameter `A` is the annotation type carried by
/// [`annotated`](crate::annotated) nodes; it is opaque to the engine and
/// surfaces again as balanced push/pop events on the renderer.
///
/// [`LayoutOptions`]: crate::LayoutOptions
pub struct Doc<A = ()> {
    node: Rc<DocNode<A>>,
}

pub(crate) struct DocNode<A> {
    flat_width: Option<usize>,
    kind: DocKind<A>,
}

pub(crate) enum DocKind<A> {
    Empty,
    HardLine,
    WhiteSpace(usize),
    Text(Span),
    Block(Rc<dyn Block>),
    Append(Doc<A>, Doc<A>),
    Alternative { default: Doc<A>, flattened: Doc<A> },
    Choice { first: Doc<A>, second: Doc<A> },
    Flattened(Doc<A>),
    Nested(Option<usize>, Doc<A>),
    Aligned(Doc<A>),
    Annotated(A, Doc<A>),
}

impl<A> Doc<A> {
    pub(crate) fn from_kind(kind: DocKind<A>) -> Doc<A> {
        let flat_width = flat_width_of(&kind);
        Doc {
            node: Rc::new(DocNode { flat_width, kind }),
        }
    }

    pub(crate) fn kind(&self) -> &DocKind<A> {
        &self.node.kind
    }

    /// Total printable width assuming every enclosed line break flattens,
    /// or `None` when the subtree contains a break that survives
    /// flattening.
    pub(crate) fn flat_width(&self) -> Option<usize> {
        self.node.flat_width
    }

    /// Rebuilds the tree, replacing every annotation with `map(&annotation)`.
    ///
    /// Both branches of every alternative and choice are rebuilt, so `map`
    /// may run more than once per original annotation. When replacing
    /// annotation values is the only transformation needed, prefer wrapping
    /// the renderer in [`MapAnnotations`](crate::MapAnnotations), which maps
    /// each annotation exactly once, after layout choices are resolved.
    pub fn map_annotations<B>(&self, map: impl Fn(&A) -> B) -> Doc<B> {
        rebuild(self, &|value, inner| {
            Doc::from_kind(DocKind::Annotated(map(value), inner))
        })
    }

    /// Rebuilds the tree, replacing every annotation with zero or more new
    /// annotations.
    ///
    /// The produced annotations nest left to right outward: the first
    /// element of the returned vector becomes the innermost annotation.
    /// The caveat on [`map_annotations`](Self::map_annotations) about
    /// rebuilding both branches of alternatives and choices applies here
    /// too.
    pub fn flat_map_annotations<B>(&self, map: impl Fn(&A) -> Vec<B>) -> Doc<B> {
        rebuild(self, &|value, inner| {
            map(value).into_iter().fold(inner, |acc, annotation| {
                Doc::from_kind(DocKind::Annotated(annotation, acc))
            })
        })
    }
}

/// Rebuilds every structural node, delegating annotation nodes to
/// `annotate`, which receives the original value and the rebuilt child.
fn rebuild<A, B, G>(doc: &Doc<A>, annotate: &G) -> Doc<B>
where
    G: Fn(&A, Doc<B>) -> Doc<B>,
{
    match doc.kind() {
        DocKind::Empty => Doc::from_kind(DocKind::Empty),
        DocKind::HardLine => Doc::from_kind(DocKind::HardLine),
        DocKind::WhiteSpace(amount) => Doc::from_kind(DocKind::WhiteSpace(*amount)),
        DocKind::Text(span) => Doc::from_kind(DocKind::Text(span.clone())),
        DocKind::Block(block) => Doc::from_kind(DocKind::Block(Rc::clone(block))),
        DocKind::Append(left, right) => Doc::from_kind(DocKind::Append(
            rebuild(left, annotate),
            rebuild(right, annotate),
        )),
        DocKind::Alternative { default, flattened } => Doc::from_kind(DocKind::Alternative {
            default: rebuild(default, annotate),
            flattened: rebuild(flattened, annotate),
        }),
        DocKind::Choice { first, second } => Doc::from_kind(DocKind::Choice {
            first: rebuild(first, annotate),
            second: rebuild(second, annotate),
        }),
        DocKind::Flattened(inner) => {
            Doc::from_kind(DocKind::Flattened(rebuild(inner, annotate)))
        }
        DocKind::Nested(amount, inner) => {
            Doc::from_kind(DocKind::Nested(*amount, rebuild(inner, annotate)))
        }
        DocKind::Aligned(inner) => Doc::from_kind(DocKind::Aligned(rebuild(inner, annotate))),
        DocKind::Annotated(value, inner) => annotate(value, rebuild(inner, annotate)),
    }
}

impl<A> Clone for Doc<A> {
    fn clone(&self) -> Self {
        Doc {
            node: Rc::clone(&self.node),
        }
    }
}

fn flat_width_of<A>(kind: &DocKind<A>) -> Option<usize> {
    match kind {
        DocKind::Empty => Some(0),
        DocKind::HardLine => None,
        DocKind::WhiteSpace(amount) => Some(*amount),
        DocKind::Text(span) => Some(span.width()),
        DocKind::Block(block) => match block.height() {
            0 => Some(0),
            1 => Some(block.width()),
            _ => None,
        },
        DocKind::Append(left, right) => match (left.flat_width(), right.flat_width()) {
            (Some(l), Some(r)) => Some(l + r),
            _ => None,
        },
        DocKind::Alternative { flattened, .. } => flattened.flat_width(),
        DocKind::Choice { first, .. } => first.flat_width(),
        DocKind::Flattened(inner)
        | DocKind::Nested(_, inner)
        | DocKind::Aligned(inner)
        | DocKind::Annotated(_, inner) => inner.flat_width(),
    }
}

impl<A: fmt::Debug> fmt::Debug for Doc<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn visit<A: fmt::Debug>(doc: &Doc<A>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match doc.kind() {
                DocKind::Empty => write!(f, "Empty"),
                DocKind::HardLine => write!(f, "HardLine"),
                DocKind::WhiteSpace(amount) => write!(f, "(WhiteSpace {amount})"),
                DocKind::Text(span) => write!(f, "(Text {span:?})"),
                DocKind::Block(block) => {
                    write!(f, "(Block {}x{})", block.width(), block.height())
                }
                DocKind::Append(left, right) => {
                    write!(f, "(Append ")?;
                    visit(left, f)?;
                    write!(f, " ")?;
                    visit(right, f)?;
                    write!(f, ")")
                }
                DocKind::Alternative { default, flattened } => {
                    write!(f, "(Alternative ")?;
                    visit(default, f)?;
                    write!(f, " ")?;
                    visit(flattened, f)?;
                    write!(f, ")")
                }
                DocKind::Choice { first, second } => {
                    write!(f, "(Choice ")?;
                    visit(first, f)?;
                    write!(f, " ")?;
                    visit(second, f)?;
                    write!(f, ")")
                }
                DocKind::Flattened(inner) => {
                    write!(f, "(Flattened ")?;
                    visit(inner, f)?;
                    write!(f, ")")
                }
                DocKind::Nested(amount, inner) => {
                    match amount {
                        Some(amount) => write!(f, "(Nested {amount} ")?,
                        None => write!(f, "(Nested ")?,
                    }
                    visit(inner, f)?;
                    write!(f, ")")
                }
                DocKind::Aligned(inner) => {
                    write!(f, "(Aligned ")?;
                    visit(inner, f)?;
                    write!(f, ")")
                }
                DocKind::Annotated(value, inner) => {
                    write!(f, "(Annotated {value:?} ")?;
                    visit(inner, f)?;
                    write!(f, ")")
                }
            }
        }
        visit(self, f)
    }
}

/// Renders the document with [`LayoutOptions::default`].
///
/// [`LayoutOptions::default`]: crate::LayoutOptions::default
impl<A: Clone> fmt::Display for Doc<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::layout::cancel::CancelToken;
        use crate::layout::engine::render;
        use crate::layout::options::LayoutOptions;
        use crate::layout::render::PlainText;

        let mut renderer = PlainText::new(&mut *f);
        render(
            self,
            &mut renderer,
            &LayoutOptions::default(),
            &CancelToken::new(),
        )
        .map_err(|_| fmt::Error)
    }
}
