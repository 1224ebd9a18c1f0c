mod layout;

pub use self::layout::{
    Block, CancelToken, Doc, LayoutError, LayoutMode, LayoutOptions, MapAnnotations, PageWidth,
    PlainText, Renderer, RowSink, aligned, alternative, annotated, append, choice, concat, embed,
    empty, flattened, grouped, hanging, hard_line, indented, line_break, line_break_hint, line_or,
    nest, nest_default, reflow, render, render_to_string, separated, separated_and_terminated,
    text, text_unchecked, white_space, zero_width_line_break, zero_width_line_break_hint,
};
