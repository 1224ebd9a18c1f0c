use std::marker::PhantomData;

use crate::layout::error::LayoutError;
use crate::layout::render::Renderer;

/// Wraps a renderer, transforming every annotation that passes through.
///
/// Cheaper than [`Doc::map_annotations`](crate::Doc::map_annotations) when
/// replacing annotation values is the only change needed: the engine has
/// already resolved layout choices by the time an annotation reaches the
/// adapter, so the function runs exactly once per emitted annotation.
pub struct MapAnnotations<R, F, B> {
    inner: R,
    map: F,
    _target: PhantomData<fn() -> B>,
}

impl<R, F, B> MapAnnotations<R, F, B> {
    pub fn new(inner: R, map: F) -> MapAnnotations<R, F, B> {
        MapAnnotations {
            inner,
            map,
            _target: PhantomData,
        }
    }

    /// Returns the wrapped renderer.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<A, B, R, F> Renderer<A> for MapAnnotations<R, F, B>
where
    R: Renderer<B>,
    F: Fn(&A) -> B,
{
    fn text(&mut self, text: &str) -> Result<(), LayoutError> {
        self.inner.text(text)
    }

    fn new_line(&mut self) -> Result<(), LayoutError> {
        self.inner.new_line()
    }

    fn white_space(&mut self, amount: usize) -> Result<(), LayoutError> {
        self.inner.white_space(amount)
    }

    fn push_annotation(&mut self, annotation: &A) -> Result<(), LayoutError> {
        let mapped = (self.map)(annotation);
        self.inner.push_annotation(&mapped)
    }

    fn pop_annotation(&mut self) -> Result<(), LayoutError> {
        self.inner.pop_annotation()
    }
}
