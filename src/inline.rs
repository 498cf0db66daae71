use serde::Serialize;

/// Inline content of a paragraph, heading or link
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    SoftBreak,
    LineBreak,
    Code(String),
    Html(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        destination: String,
        children: Vec<Inline>,
    },
    Image {
        source: String,
        children: Vec<Inline>,
    },
}

/// A normalized view of an image, whether or not it is wrapped in a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Image {
    pub source: Option<String>,
    pub alt: String,
    pub destination: Option<String>,
}

impl Inline {
    /// Child inlines of container variants. Leaves return `None`.
    pub fn children(&self) -> Option<&[Inline]> {
        match self {
            Inline::Text(_)
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Code(_)
            | Inline::Html(_) => None,
            Inline::Emphasis(children)
            | Inline::Strong(children)
            | Inline::Strikethrough(children)
            | Inline::Link { children, .. }
            | Inline::Image { children, .. } => Some(children.as_slice()),
        }
    }

    /// Rewrites the tree bottom-up.
    ///
    /// Children are rewritten first, the container is rebuilt around them, and
    /// `transform` is called on the rebuilt node. Whatever `transform` returns
    /// is spliced in place of the node, so it can drop a node (empty vec) or
    /// expand it into several.
    pub fn apply<F>(&self, transform: &mut F) -> Vec<Inline>
    where
        F: FnMut(Inline) -> Vec<Inline>,
    {
        let rebuilt = match self {
            Inline::Text(_)
            | Inline::SoftBreak
            | Inline::LineBreak
            | Inline::Code(_)
            | Inline::Html(_) => self.clone(),
            Inline::Emphasis(children) => Inline::Emphasis(children.apply(transform)),
            Inline::Strong(children) => Inline::Strong(children.apply(transform)),
            Inline::Strikethrough(children) => Inline::Strikethrough(children.apply(transform)),
            Inline::Link {
                destination,
                children,
            } => Inline::Link {
                destination: destination.clone(),
                children: children.apply(transform),
            },
            Inline::Image { source, children } => Inline::Image {
                source: source.clone(),
                children: children.apply(transform),
            },
        };
        transform(rebuilt)
    }

    /// Folds the tree bottom-up: values from the children come first, in
    /// document order, followed by whatever `extract` yields for this node.
    pub fn collect<T, F>(&self, extract: &mut F) -> Vec<T>
    where
        F: FnMut(&Inline) -> Vec<T>,
    {
        let mut values = match self.children() {
            Some(children) => children.collect(extract),
            None => Vec::new(),
        };
        values.extend(extract(self));
        values
    }

    /// Concatenated text of every `Text` node in this tree.
    pub fn text(&self) -> String {
        self.collect(&mut text_values).concat()
    }

    /// The image this inline displays, if it is an image or a link around
    /// exactly one image.
    pub fn image(&self) -> Option<Image> {
        match self {
            Inline::Image { source, children } => Some(Image {
                source: Some(source.clone()),
                alt: children.text(),
                destination: None,
            }),
            Inline::Link {
                destination,
                children,
            } => match children.as_slice() {
                [Inline::Image { source, children }] => Some(Image {
                    source: Some(source.clone()),
                    alt: children.text(),
                    destination: Some(destination.clone()),
                }),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Tree operations over a run of sibling inlines.
pub trait InlineSliceExt {
    fn apply<F>(&self, transform: &mut F) -> Vec<Inline>
    where
        F: FnMut(Inline) -> Vec<Inline>;

    fn collect<T, F>(&self, extract: &mut F) -> Vec<T>
    where
        F: FnMut(&Inline) -> Vec<T>;

    fn text(&self) -> String;
}

impl InlineSliceExt for [Inline] {
    fn apply<F>(&self, transform: &mut F) -> Vec<Inline>
    where
        F: FnMut(Inline) -> Vec<Inline>,
    {
        let mut result = Vec::with_capacity(self.len());
        for inline in self {
            result.extend(inline.apply(transform));
        }
        result
    }

    fn collect<T, F>(&self, extract: &mut F) -> Vec<T>
    where
        F: FnMut(&Inline) -> Vec<T>,
    {
        let mut values = Vec::new();
        for inline in self {
            values.extend(inline.collect(extract));
        }
        values
    }

    fn text(&self) -> String {
        self.collect(&mut text_values).concat()
    }
}

fn text_values(inline: &Inline) -> Vec<String> {
    match inline {
        Inline::Text(value) => vec![value.clone()],
        _ => Vec::new(),
    }
}
