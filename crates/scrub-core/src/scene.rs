use crate::{Color, Rect, Vec2};
use smallvec::SmallVec;

/// Measured metrics for a run of text, as reported by the host's font
/// machinery. `descent` and `leading` follow the usual typographic
/// meaning; `height` includes the descent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
    pub descent: f32,
    pub leading: f32,
}

/// One drawing instruction. The host replays these in order onto its
/// drawing surface; text is drawn with a transparent background.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Let the parent control paint this region (transparent widget).
    ParentFill,
    Rect {
        rect: Rect,
        color: Color,
    },
    Border {
        rect: Rect,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Color,
    },
}

/// The output of a paint pass. A scrubber emits at most a handful of
/// commands, so the list stays inline.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub cmds: SmallVec<[DrawCmd; 4]>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_iterate() {
        let mut list = DisplayList::new();
        assert!(list.is_empty());
        list.push(DrawCmd::ParentFill);
        list.push(DrawCmd::Rect {
            rect: Rect::default(),
            color: Color::BLACK,
        });
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().next(), Some(&DrawCmd::ParentFill));
    }
}
