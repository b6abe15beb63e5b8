//! Screen-anchored and transform-attached text labels.
//!
//! Text is not batched. Every render pass draws each live label directly and
//! records that it did so in the entry's [`Visibility`]. Two independent
//! passes consume the same entries: the editor [`RenderPass::Gizmo`] pass and
//! the runtime [`RenderPass::Gui`] pass. An entry may only expire, or have its
//! content refreshed, on a tick after *both* passes have drawn it, so neither
//! pass ever misses a label or sees it change mid-frame.
//!
//! Without an editor there is no gizmo pass; the registry is then created
//! with `gizmo_pass = false` and entries start (and reset to)
//! [`Visibility::GizmoPassDone`].

use overlay_core::math::{Vec2, Vec3};
use overlay_core::pool::{EntryPool, Poolable};
use overlay_core::transform::WeakTransform;

use crate::color::Color;
use crate::sink::{ScreenRect, TextSink};
use crate::view::ScreenView;

/// Identity of a text render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPass {
    /// Editor inspection view.
    Gizmo,
    /// Always-present runtime overlay.
    Gui,
}

/// Which render passes have drawn an entry since its last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    None,
    GizmoPassDone,
    GuiPassDone,
    BothPassesDone,
}

impl Visibility {
    /// State an entry starts in, and returns to after a refresh.
    pub fn initial(gizmo_pass: bool) -> Self {
        if gizmo_pass {
            Self::None
        } else {
            Self::GizmoPassDone
        }
    }

    /// Record that `pass` drew the entry. Idempotent and order-independent.
    pub fn observe(self, pass: RenderPass) -> Self {
        match (self, pass) {
            (Self::None, RenderPass::Gizmo) => Self::GizmoPassDone,
            (Self::None, RenderPass::Gui) => Self::GuiPassDone,
            (Self::GizmoPassDone, RenderPass::Gui) | (Self::GuiPassDone, RenderPass::Gizmo) => {
                Self::BothPassesDone
            }
            (state, _) => state,
        }
    }

    /// Both passes have drawn the entry.
    pub fn is_complete(self) -> bool {
        self == Self::BothPassesDone
    }
}

/// Color and font size of a label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: u32,
}

impl TextStyle {
    pub fn new(color: Color, size: u32) -> Self {
        Self { color, size }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Color::WHITE, 12)
    }
}

/// Something text can be attached to.
///
/// Implementations must answer without panicking; `None` means the target is
/// gone and the attached text is freed on the next tick.
///
/// The position is queried during ticks and render passes while the overlay
/// is borrowed, so an implementation must not call back into the overlay or
/// into a [`DebugDraw`](crate::DebugDraw) handle sharing it.
pub trait AttachTarget: Send {
    fn world_position(&self) -> Option<Vec3>;
}

impl AttachTarget for WeakTransform {
    fn world_position(&self) -> Option<Vec3> {
        self.upgrade().map(|transform| transform.read().position())
    }
}

impl<F> AttachTarget for F
where
    F: Fn() -> Option<Vec3> + Send,
{
    fn world_position(&self) -> Option<Vec3> {
        self()
    }
}

/// Produces the current text of an attached label.
pub type ContentFn = Box<dyn FnMut() -> String + Send>;

/// A content callback lifted out of its label so it can run while the
/// overlay is not borrowed.
///
/// Produced by [`TextOverlay::advance_deferred`]. Call [`run`](Self::run),
/// then hand it back with [`TextOverlay::finish_refresh`].
pub struct PendingRefresh {
    index: usize,
    content: ContentFn,
    text: String,
}

impl PendingRefresh {
    /// Invoke the content callback and keep its text.
    pub fn run(&mut self) {
        self.text = (self.content)();
    }
}

impl std::fmt::Debug for PendingRefresh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRefresh")
            .field("index", &self.index)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// Identifies a text entry by pool and slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextHandle {
    Screen(usize),
    Attached(usize),
}

#[derive(Debug, Default)]
struct ScreenText {
    anchor: Vec3,
    text: String,
    style: TextStyle,
    remaining: f32,
    duration: f32,
    pop_up: bool,
    visibility: Visibility,
}

impl Poolable for ScreenText {
    fn new_empty() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.text.clear();
        self.remaining = 0.0;
        self.duration = 0.0;
        self.pop_up = false;
        self.visibility = Visibility::None;
    }
}

#[derive(Default)]
struct AttachedText {
    target: Option<Box<dyn AttachTarget>>,
    content: Option<ContentFn>,
    text: String,
    offset: Vec3,
    style: TextStyle,
    visibility: Visibility,
}

impl std::fmt::Debug for AttachedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachedText")
            .field("text", &self.text)
            .field("offset", &self.offset)
            .field("style", &self.style)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

impl Poolable for AttachedText {
    fn new_empty() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        // Dropping the callback releases whatever it captured.
        self.target = None;
        self.content = None;
        self.text.clear();
        self.visibility = Visibility::None;
    }
}

impl AttachedText {
    fn position(&self) -> Option<Vec3> {
        self.target.as_ref().and_then(|target| target.world_position())
    }
}

/// Vertical pop-up shift in pixels for a label with `remaining` of
/// `duration` seconds left.
///
/// Grows from 0 at registration to `size * height` when the timer runs out.
pub fn pop_up_offset(remaining: f32, duration: f32, size: u32, height: f32) -> f32 {
    let ratio = if duration > 0.0 {
        remaining / duration
    } else {
        0.0
    };
    (1.0 - ratio * ratio) * size as f32 * height
}

/// Registry of text labels and their dual-pass visibility.
#[derive(Debug)]
pub struct TextOverlay {
    screen: EntryPool<ScreenText>,
    attached: EntryPool<AttachedText>,
    gizmo_pass: bool,
    pop_up_height: f32,
    refreshes: usize,
}

impl TextOverlay {
    /// Create an empty registry.
    ///
    /// `gizmo_pass` tells whether an editor gizmo pass will run;
    /// `pop_up_height` scales the pop-up rise in multiples of the font size.
    pub fn new(gizmo_pass: bool, pop_up_height: f32) -> Self {
        Self {
            screen: EntryPool::with_capacity(16),
            attached: EntryPool::with_capacity(16),
            gizmo_pass,
            pop_up_height,
            refreshes: 0,
        }
    }

    /// Show `text` at a world position for `duration` seconds.
    ///
    /// With `pop_up` the label drifts upwards as it ages, so repeated labels
    /// at one spot stay readable.
    pub fn draw_text(
        &mut self,
        anchor: Vec3,
        text: &str,
        style: TextStyle,
        duration: f32,
        pop_up: bool,
    ) -> TextHandle {
        let visibility = Visibility::initial(self.gizmo_pass);
        let index = self.screen.register(|entry| {
            entry.anchor = anchor;
            entry.text.push_str(text);
            entry.style = style;
            entry.remaining = duration;
            entry.duration = duration;
            entry.pop_up = pop_up;
            entry.visibility = visibility;
        });
        TextHandle::Screen(index)
    }

    /// Follow `target` with a label showing `text` until `content` replaces
    /// it after the first completed dual-pass cycle.
    ///
    /// The label lives until the target dies. `content` is not called here.
    pub fn attach_text(
        &mut self,
        target: impl AttachTarget + 'static,
        text: String,
        content: impl FnMut() -> String + Send + 'static,
        offset: Vec3,
        style: TextStyle,
    ) -> TextHandle {
        let visibility = Visibility::initial(self.gizmo_pass);
        let index = self.attached.register(|entry| {
            entry.target = Some(Box::new(target));
            entry.content = Some(Box::new(content));
            entry.text = text;
            entry.offset = offset;
            entry.style = style;
            entry.visibility = visibility;
        });
        TextHandle::Attached(index)
    }

    /// Advance text timers by one frame.
    ///
    /// Screen text counts down every tick but is only freed once both passes
    /// have drawn it. Attached text with a dead target is freed immediately;
    /// live attached text refreshes its content after a complete cycle.
    /// Returns the number of freed entries.
    pub fn advance(&mut self, dt: f32) -> usize {
        let mut pending = Vec::new();
        let freed = self.advance_deferred(dt, &mut pending);
        for mut refresh in pending {
            refresh.run();
            self.finish_refresh(refresh);
        }
        freed
    }

    /// [`advance`](Self::advance) without calling any content callback.
    ///
    /// Labels due for a refresh have their visibility reset and their
    /// callback moved into `pending`; they keep showing the old text until
    /// the refresh is handed back through
    /// [`finish_refresh`](Self::finish_refresh).
    pub fn advance_deferred(&mut self, dt: f32, pending: &mut Vec<PendingRefresh>) -> usize {
        let freed_screen = self.screen.release_where(|entry| {
            entry.remaining -= dt;
            entry.visibility.is_complete() && entry.remaining < 0.0
        });

        let freed_attached = self
            .attached
            .release_where(|entry| entry.position().is_none());
        if freed_attached > 0 {
            log::debug!("Freed {freed_attached} attached labels with dead targets");
        }

        let reset_to = Visibility::initial(self.gizmo_pass);
        for index in 0..self.attached.len() {
            let Some(entry) = self.attached.get_mut(index) else {
                continue;
            };
            if !entry.visibility.is_complete() {
                continue;
            }
            entry.visibility = reset_to;
            if let Some(content) = entry.content.take() {
                pending.push(PendingRefresh {
                    index,
                    content,
                    text: String::new(),
                });
            }
        }

        freed_screen + freed_attached
    }

    /// Store the text of a refresh taken by
    /// [`advance_deferred`](Self::advance_deferred) and give the label its
    /// callback back.
    ///
    /// Dropped if the label was freed in the meantime.
    pub fn finish_refresh(&mut self, refresh: PendingRefresh) {
        let PendingRefresh {
            index,
            content,
            text,
        } = refresh;
        match self.attached.get_mut(index) {
            Some(entry) if entry.content.is_none() => {
                entry.text = text;
                entry.content = Some(content);
                self.refreshes += 1;
            }
            _ => log::trace!("Dropped refresh for freed attached label {index}"),
        }
    }

    /// Draw every live label for `pass` and record the pass on each entry.
    ///
    /// Without a view the pass is skipped entirely and no entry is marked.
    /// Returns the number of labels drawn.
    pub fn render_pass(
        &mut self,
        pass: RenderPass,
        view: Option<&dyn ScreenView>,
        sink: &mut dyn TextSink,
    ) -> usize {
        let Some(view) = view else {
            return 0;
        };
        let height = view.screen_height();
        let pop_up_height = self.pop_up_height;
        let mut drawn = 0;

        for entry in self.screen.iter_active_mut() {
            let screen = view.world_to_screen(entry.anchor);
            let mut y = height - screen.y;
            if entry.pop_up {
                y -= pop_up_offset(
                    entry.remaining,
                    entry.duration,
                    entry.style.size,
                    pop_up_height,
                );
            }
            draw_label(sink, Vec2::new(screen.x, y), &entry.text, &entry.style);
            entry.visibility = entry.visibility.observe(pass);
            drawn += 1;
        }

        for entry in self.attached.iter_active_mut() {
            if let Some(position) = entry.position() {
                let screen = view.world_to_screen(position + entry.offset);
                let anchor = Vec2::new(screen.x, height - screen.y);
                draw_label(sink, anchor, &entry.text, &entry.style);
                drawn += 1;
            }
            entry.visibility = entry.visibility.observe(pass);
        }

        drawn
    }

    /// Visibility of a live entry.
    pub fn visibility_of(&self, handle: TextHandle) -> Option<Visibility> {
        match handle {
            TextHandle::Screen(i) => self.screen.get(i).map(|e| e.visibility),
            TextHandle::Attached(i) => self.attached.get(i).map(|e| e.visibility),
        }
    }

    /// Current text of a live entry.
    pub fn text(&self, handle: TextHandle) -> Option<&str> {
        match handle {
            TextHandle::Screen(i) => self.screen.get(i).map(|e| e.text.as_str()),
            TextHandle::Attached(i) => self.attached.get(i).map(|e| e.text.as_str()),
        }
    }

    pub fn is_occupied(&self, handle: TextHandle) -> bool {
        match handle {
            TextHandle::Screen(i) => self.screen.is_occupied(i),
            TextHandle::Attached(i) => self.attached.is_occupied(i),
        }
    }

    /// Live labels as `(screen, attached)`.
    pub fn active_counts(&self) -> (usize, usize) {
        (self.screen.active_count(), self.attached.active_count())
    }

    /// Content callback invocations after registration so far.
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    /// Free every label.
    pub fn clear(&mut self) {
        self.screen.release_all();
        self.attached.release_all();
    }
}

fn draw_label(sink: &mut dyn TextSink, anchor: Vec2, text: &str, style: &TextStyle) {
    let size = sink.measure(text, style);
    let rect = ScreenRect {
        x: anchor.x,
        y: anchor.y,
        width: size.x,
        height: size.y,
    };
    sink.draw_label(rect, text, style);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use overlay_core::transform::{shared, Transform};

    use super::*;

    /// Identity projection on a 100px tall screen.
    struct FlatView;

    impl ScreenView for FlatView {
        fn world_to_screen(&self, point: Vec3) -> Vec3 {
            point
        }

        fn screen_height(&self) -> f32 {
            100.0
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        labels: Vec<(ScreenRect, String)>,
    }

    impl TextSink for RecordingSink {
        fn measure(&self, text: &str, style: &TextStyle) -> Vec2 {
            Vec2::new(
                text.len() as f32 * style.size as f32 * 0.5,
                style.size as f32,
            )
        }

        fn draw_label(&mut self, rect: ScreenRect, text: &str, _style: &TextStyle) {
            self.labels.push((rect, text.to_string()));
        }
    }

    fn both_passes(overlay: &mut TextOverlay, sink: &mut RecordingSink) {
        overlay.render_pass(RenderPass::Gizmo, Some(&FlatView), sink);
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), sink);
    }

    #[test]
    fn test_visibility_transitions() {
        use RenderPass::*;
        let v = Visibility::None;
        assert_eq!(v.observe(Gizmo), Visibility::GizmoPassDone);
        assert_eq!(v.observe(Gui), Visibility::GuiPassDone);
        assert_eq!(v.observe(Gizmo).observe(Gui), Visibility::BothPassesDone);
        assert_eq!(v.observe(Gui).observe(Gizmo), Visibility::BothPassesDone);
        assert_eq!(v.observe(Gui).observe(Gui), Visibility::GuiPassDone);
        assert_eq!(
            Visibility::BothPassesDone.observe(Gizmo),
            Visibility::BothPassesDone
        );
    }

    #[test]
    fn test_initial_visibility() {
        assert_eq!(Visibility::initial(true), Visibility::None);
        assert_eq!(Visibility::initial(false), Visibility::GizmoPassDone);
    }

    #[test]
    fn test_expired_text_waits_for_both_passes() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        let handle = overlay.draw_text(Vec3::zeros(), "hit", TextStyle::default(), -1.0, false);

        overlay.advance(0.1);
        assert!(overlay.is_occupied(handle));

        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        overlay.advance(0.1);
        assert!(overlay.is_occupied(handle));

        overlay.render_pass(RenderPass::Gizmo, Some(&FlatView), &mut sink);
        overlay.advance(0.1);
        assert!(!overlay.is_occupied(handle));
        assert_eq!(sink.labels.len(), 3);
    }

    #[test]
    fn test_text_lives_for_its_duration() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        let handle = overlay.draw_text(Vec3::zeros(), "x", TextStyle::default(), 0.25, false);

        both_passes(&mut overlay, &mut sink);
        overlay.advance(0.125);
        assert!(overlay.is_occupied(handle));
        overlay.advance(0.125);
        assert!(overlay.is_occupied(handle));
        overlay.advance(0.125);
        assert!(!overlay.is_occupied(handle));
    }

    #[test]
    fn test_without_gizmo_pass_gui_alone_completes() {
        let mut overlay = TextOverlay::new(false, 1.5);
        let mut sink = RecordingSink::default();
        let handle = overlay.draw_text(Vec3::zeros(), "x", TextStyle::default(), 0.0, false);
        assert_eq!(
            overlay.visibility_of(handle),
            Some(Visibility::GizmoPassDone)
        );

        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        assert_eq!(
            overlay.visibility_of(handle),
            Some(Visibility::BothPassesDone)
        );
        overlay.advance(0.016);
        assert!(!overlay.is_occupied(handle));
    }

    #[test]
    fn test_missing_view_mutes_and_does_not_mark() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        let handle = overlay.draw_text(Vec3::zeros(), "x", TextStyle::default(), 0.0, false);

        assert_eq!(overlay.render_pass(RenderPass::Gui, None, &mut sink), 0);
        assert_eq!(overlay.visibility_of(handle), Some(Visibility::None));
        assert!(sink.labels.is_empty());
    }

    #[test]
    fn test_screen_anchor_flips_y() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        overlay.draw_text(
            Vec3::new(10.0, 30.0, 0.0),
            "ab",
            TextStyle::default(),
            1.0,
            false,
        );
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);

        let (rect, text) = &sink.labels[0];
        assert_eq!(text, "ab");
        assert_eq!((rect.x, rect.y), (10.0, 70.0));
        assert_eq!((rect.width, rect.height), (12.0, 12.0));
    }

    #[test]
    fn test_pop_up_rises_as_time_runs_out() {
        assert_eq!(pop_up_offset(1.0, 1.0, 12, 1.5), 0.0);
        assert_eq!(pop_up_offset(0.5, 1.0, 12, 1.5), 0.75 * 18.0);
        assert_eq!(pop_up_offset(0.0, 1.0, 12, 1.5), 18.0);
        assert_eq!(pop_up_offset(0.0, 0.0, 12, 1.5), 18.0);

        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        overlay.draw_text(
            Vec3::new(0.0, 30.0, 0.0),
            "up",
            TextStyle::default(),
            1.0,
            true,
        );
        overlay.advance(0.5);
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        assert_eq!(sink.labels[0].0.y, 70.0 - 13.5);
    }

    #[test]
    fn test_attached_follows_target_and_refreshes_once_per_cycle() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        let host = shared(Transform::from_translation(Vec3::new(5.0, 10.0, 0.0)));
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let handle = overlay.attach_text(
            Arc::downgrade(&host),
            "#0".to_string(),
            move || format!("#{}", counter.fetch_add(1, Ordering::SeqCst) + 1),
            Vec3::new(0.0, 1.0, 0.0),
            TextStyle::default(),
        );
        assert_eq!(overlay.text(handle), Some("#0"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // One pass only: no refresh.
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        overlay.advance(0.016);
        assert_eq!(overlay.text(handle), Some("#0"));
        assert_eq!(sink.labels[0].0.y, 100.0 - 11.0);

        overlay.render_pass(RenderPass::Gizmo, Some(&FlatView), &mut sink);
        overlay.render_pass(RenderPass::Gizmo, Some(&FlatView), &mut sink);
        overlay.advance(0.016);
        assert_eq!(overlay.text(handle), Some("#1"));
        assert_eq!(overlay.visibility_of(handle), Some(Visibility::None));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(overlay.refresh_count(), 1);
    }

    #[test]
    fn test_attached_resets_to_gizmo_done_without_gizmo_pass() {
        let mut overlay = TextOverlay::new(false, 1.5);
        let mut sink = RecordingSink::default();
        let host = shared(Transform::IDENTITY);
        let handle = overlay.attach_text(
            Arc::downgrade(&host),
            "hp".to_string(),
            || "hp".to_string(),
            Vec3::zeros(),
            TextStyle::default(),
        );
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        overlay.advance(0.016);
        assert_eq!(
            overlay.visibility_of(handle),
            Some(Visibility::GizmoPassDone)
        );
    }

    #[test]
    fn test_dead_target_frees_without_callback_and_releases_it() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let host = shared(Transform::IDENTITY);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let handle = overlay.attach_text(
            Arc::downgrade(&host),
            String::new(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                String::new()
            },
            Vec3::zeros(),
            TextStyle::default(),
        );
        assert_eq!(Arc::strong_count(&calls), 2);

        drop(host);
        assert_eq!(overlay.advance(0.016), 1);
        assert!(!overlay.is_occupied(handle));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(Arc::strong_count(&calls), 1);
    }

    #[test]
    fn test_dead_target_is_not_drawn_but_marked() {
        let mut overlay = TextOverlay::new(true, 1.5);
        let mut sink = RecordingSink::default();
        let handle = overlay.attach_text(
            || -> Option<Vec3> { None },
            String::new(),
            String::new,
            Vec3::zeros(),
            TextStyle::default(),
        );
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        assert!(sink.labels.is_empty());
        assert_eq!(overlay.visibility_of(handle), Some(Visibility::GuiPassDone));
    }

    #[test]
    fn test_slot_reuse_after_expiry() {
        let mut overlay = TextOverlay::new(false, 1.5);
        let mut sink = RecordingSink::default();
        let first = overlay.draw_text(Vec3::zeros(), "a", TextStyle::default(), 0.0, false);
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);
        overlay.advance(0.1);
        let second = overlay.draw_text(Vec3::zeros(), "b", TextStyle::default(), 0.0, false);
        assert_eq!(first, second);
        assert_eq!(overlay.text(second), Some("b"));
    }

    #[test]
    fn test_deferred_refresh_keeps_old_text_until_finished() {
        let mut overlay = TextOverlay::new(false, 1.5);
        let mut sink = RecordingSink::default();
        let host = shared(Transform::IDENTITY);
        let handle = overlay.attach_text(
            Arc::downgrade(&host),
            "old".to_string(),
            || "new".to_string(),
            Vec3::zeros(),
            TextStyle::default(),
        );
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);

        let mut pending = Vec::new();
        assert_eq!(overlay.advance_deferred(0.016, &mut pending), 0);
        assert_eq!(pending.len(), 1);
        assert_eq!(overlay.text(handle), Some("old"));
        assert_eq!(
            overlay.visibility_of(handle),
            Some(Visibility::GizmoPassDone)
        );

        for mut refresh in pending {
            refresh.run();
            overlay.finish_refresh(refresh);
        }
        assert_eq!(overlay.text(handle), Some("new"));
        assert_eq!(overlay.refresh_count(), 1);
    }

    #[test]
    fn test_refresh_for_freed_label_is_dropped() {
        let mut overlay = TextOverlay::new(false, 1.5);
        let mut sink = RecordingSink::default();
        let host = shared(Transform::IDENTITY);
        overlay.attach_text(
            Arc::downgrade(&host),
            "a".to_string(),
            || "b".to_string(),
            Vec3::zeros(),
            TextStyle::default(),
        );
        overlay.render_pass(RenderPass::Gui, Some(&FlatView), &mut sink);

        let mut pending = Vec::new();
        overlay.advance_deferred(0.016, &mut pending);
        overlay.clear();
        let replacement = overlay.attach_text(
            Arc::downgrade(&host),
            "c".to_string(),
            || "d".to_string(),
            Vec3::zeros(),
            TextStyle::default(),
        );
        for mut refresh in pending {
            refresh.run();
            overlay.finish_refresh(refresh);
        }
        assert_eq!(overlay.text(replacement), Some("c"));
        assert_eq!(overlay.refresh_count(), 0);
    }
}
