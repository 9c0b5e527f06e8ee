//! Classification of an edit event.
//!
//! Each rule inspects the previous and current lines and either claims the event or passes.
//! Rules run in priority order and the first match wins; [`Transition::Jump`] is the fallback.

use std::cmp::Ordering;

use crate::line::EditableLine;
use crate::tree::TreeAdapter;

/// How the selection or content changed since the previous event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First event of a session: state seeded, nothing spoken.
    Initial,
    /// Same line, same selection, same text: nothing to report.
    Unchanged,
    /// Speech suppressed (continuous reading or a braille-only region); braille refreshed.
    BrailleOnly,
    /// Both endpoints stayed on their lines.
    IntraLine,
    /// The text of the selection's container changed.
    TextChanged,
    /// The current line has no text.
    NoText,
    /// One endpoint of a selection stayed put while the other moved to another line.
    ExtendFromAnchor {
        /// The end endpoint moved (the anchor is the start).
        forward: bool,
        /// The selection got larger.
        grew: bool,
    },
    /// A selection that is not an extension of the previous one.
    FullSelection,
    /// The caret moved to an unrelated line.
    Jump,
}

/// Everything a rule may look at.
pub(crate) struct RuleContext<'a, T: TreeAdapter + ?Sized> {
    pub(crate) tree: &'a T,
    pub(crate) root: T::Node,
    pub(crate) cur: &'a EditableLine<T::Node>,
    pub(crate) prev: &'a EditableLine<T::Node>,
    pub(crate) start_line: &'a EditableLine<T::Node>,
    pub(crate) end_line: &'a EditableLine<T::Node>,
    pub(crate) prev_start_line: &'a EditableLine<T::Node>,
    pub(crate) prev_end_line: &'a EditableLine<T::Node>,
    pub(crate) speech_suppressed: bool,
}

type Rule<T> = fn(&RuleContext<'_, T>) -> Option<Transition>;

fn rules<T: TreeAdapter + ?Sized>() -> [Rule<T>; 7] {
    [
        braille_only,
        intra_line,
        text_changed,
        no_text,
        extend_from_anchor,
        full_selection,
        jump,
    ]
}

/// The transition claimed by the first matching rule.
pub(crate) fn classify<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Transition {
    rules::<T>()
        .iter()
        .find_map(|rule| rule(ctx))
        .unwrap_or(Transition::Jump)
}

fn braille_only<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Option<Transition> {
    ctx.speech_suppressed.then_some(Transition::BrailleOnly)
}

fn intra_line<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Option<Transition> {
    let same = ctx.start_line.is_same_line(ctx.prev_start_line, ctx.tree)
        && ctx.end_line.is_same_line(ctx.prev_end_line, ctx.tree);
    same.then_some(Transition::IntraLine)
}

fn text_changed<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Option<Transition> {
    let (cur, prev) = (ctx.cur, ctx.prev);
    let in_root = cur.start_container() == ctx.root;
    let same_containers = cur.start_container() == prev.start_container()
        && cur.end_container() == prev.end_container();
    ((in_root || same_containers) && cur.start_container_text() != prev.start_container_text())
        .then_some(Transition::TextChanged)
}

fn no_text<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Option<Transition> {
    ctx.cur.text().is_empty().then_some(Transition::NoText)
}

fn extend_from_anchor<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Option<Transition> {
    let (cur, prev) = (ctx.cur, ctx.prev);
    if cur.has_collapsed_selection() || prev.has_collapsed_selection() {
        return None;
    }
    if cur.start() == prev.start() && cur.end() != prev.end() {
        let order = cur.end().compare(&prev.end(), ctx.tree)?;
        return Some(Transition::ExtendFromAnchor {
            forward: true,
            grew: order == Ordering::Greater,
        });
    }
    if cur.end() == prev.end() && cur.start() != prev.start() {
        let order = cur.start().compare(&prev.start(), ctx.tree)?;
        return Some(Transition::ExtendFromAnchor {
            forward: false,
            grew: order == Ordering::Less,
        });
    }
    None
}

fn full_selection<T: TreeAdapter + ?Sized>(ctx: &RuleContext<'_, T>) -> Option<Transition> {
    (!ctx.cur.has_collapsed_selection()).then_some(Transition::FullSelection)
}

fn jump<T: TreeAdapter + ?Sized>(_ctx: &RuleContext<'_, T>) -> Option<Transition> {
    Some(Transition::Jump)
}
