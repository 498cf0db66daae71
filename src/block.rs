use serde::Serialize;

use crate::inline::Inline;

/// A single list item, which can contain nested content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

/// A list item carrying a checkbox
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskListItem {
    pub is_completed: bool,
    pub blocks: Vec<Block>,
}

/// Block-level elements of a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Blockquote {
        children: Vec<Block>,
    },
    BulletedList {
        tight: bool,
        items: Vec<ListItem>,
    },
    NumberedList {
        tight: bool,
        start: u32,
        items: Vec<ListItem>,
    },
    TaskList {
        tight: bool,
        items: Vec<TaskListItem>,
    },
    CodeBlock {
        info: Option<String>,
        content: String,
    },
    Paragraph {
        content: Vec<Inline>,
    },
    Heading {
        level: u8,
        content: Vec<Inline>,
    },
    ThematicBreak,
}

impl Block {
    /// Inline content of a paragraph or heading.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Block::Paragraph { content } | Block::Heading { content, .. } => Some(content.as_slice()),
            _ => None,
        }
    }
}
