//! Board controller.
//!
//! [`Board`] owns every piece of per-board state: the committed position,
//! orientation, layout, drag machine, animation scheduler and pointer
//! throttle. It draws through a [`Renderer`] and talks to the embedding
//! application through a [`BoardHost`]; neither is reached any other way, so
//! several boards can live side by side and the whole controller can be
//! driven headless in tests.
//!
//! Every position change, whether it comes from `set_position`, a move, or a
//! resolved drag, goes through one commit step that skips no-op updates and
//! notifies the host before storing the new position.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use crate::animation::{AnimationTicket, BatchKind, Completion, Scheduler};
use crate::codec;
use crate::config::{BoardConfig, InvalidInputPolicy, ValidatedConfig};
use crate::diff::{self, Animation};
use crate::drag::{self, DragMachine, DragSession, DragSource, DropAction};
use crate::error::BoardError;
use crate::geometry::{self, GeometryCache, Orientation, Point, Rect};
use crate::host::{BoardHost, DropContext};
use crate::input::{MouseInput, PointerEvent, PointerPhase, TouchInput};
use crate::piece::PieceCode;
use crate::position::{Move, Position};
use crate::render::{Effect, Glyph, PlacedGlyph, Renderer};
use crate::square::Square;
use crate::throttle::Throttle;

pub struct Board<R, H = ()> {
    config: BoardConfig,
    renderer: R,
    host: H,
    position: Position,
    orientation: Orientation,
    layout: GeometryCache,
    drag: DragMachine,
    scheduler: Scheduler,
    throttle: Throttle<Point>,
    /// Layout rebuild requested while a drag was live.
    deferred_layout: Option<Orientation>,
    destroyed: bool,
}

impl<R: Renderer, H: BoardHost> Board<R, H> {
    /// Build a board, draw it, and place the configured initial position.
    ///
    /// An undecodable initial diagram is reported through the invalid-input
    /// channel and the board starts empty.
    #[must_use]
    pub fn new(config: BoardConfig, renderer: R, host: H) -> Self {
        let throttle = Throttle::new(config.drag_throttle_rate);
        let orientation = config.orientation;
        let mut board = Self {
            config,
            renderer,
            host,
            position: Position::empty(),
            orientation,
            layout: GeometryCache::default(),
            drag: DragMachine::new(),
            scheduler: Scheduler::new(),
            throttle,
            deferred_layout: None,
            destroyed: false,
        };

        match board.config.position.resolve() {
            Ok(position) => board.position = position,
            Err(e) => board.report(&e),
        }
        board.rebuild_layout();
        tracing::debug!(
            orientation = %board.orientation,
            square_size = board.layout.square_size(),
            position = %codec::encode(&board.position),
            "board created"
        );
        board
    }

    /// Build a board from a validated configuration, reporting every field
    /// that fell back to its default.
    #[must_use]
    pub fn from_validated(validated: ValidatedConfig, renderer: R, host: H) -> Self {
        let ValidatedConfig { config, issues } = validated;
        let mut board = Self::new(config, renderer, host);
        for issue in &issues {
            board.report(issue);
        }
        board
    }

    // --- Queries ---

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The committed position as a board diagram.
    #[must_use]
    pub fn fen(&self) -> String {
        codec::encode(&self.position)
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn layout(&self) -> &GeometryCache {
        &self.layout
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_live()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // --- Position updates ---

    /// Replace the position, animating the difference if `animate`.
    ///
    /// # Errors
    ///
    /// [`BoardError::Destroyed`] after [`Board::destroy`].
    pub fn set_position(&mut self, position: Position, animate: bool) -> Result<(), BoardError> {
        self.ensure_live()?;
        self.transition(position, animate);
        Ok(())
    }

    /// Replace the position from untyped `(square, piece-code)` pairs.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidPosition`] for a bad pair (also reported through
    /// the invalid-input channel); the position is left untouched.
    pub fn set_position_pairs<I, K, V>(&mut self, pairs: I, animate: bool) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.ensure_live()?;
        match Position::from_pairs(pairs) {
            Ok(position) => {
                self.transition(position, animate);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Replace the position from a board diagram.
    ///
    /// # Errors
    ///
    /// [`BoardError::InvalidFormat`] for a malformed diagram (also reported
    /// through the invalid-input channel); the position is left untouched.
    pub fn set_fen(&mut self, diagram: &str, animate: bool) -> Result<(), BoardError> {
        self.ensure_live()?;
        match codec::decode(diagram) {
            Ok(position) => {
                self.transition(position, animate);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Remove every piece.
    ///
    /// # Errors
    ///
    /// [`BoardError::Destroyed`] after [`Board::destroy`].
    pub fn clear(&mut self, animate: bool) -> Result<(), BoardError> {
        self.set_position(Position::empty(), animate)
    }

    /// Set up the standard starting position.
    ///
    /// # Errors
    ///
    /// [`BoardError::Destroyed`] after [`Board::destroy`].
    pub fn start(&mut self, animate: bool) -> Result<(), BoardError> {
        self.set_position(Position::start(), animate)
    }

    /// Move whatever stands on `from` to `to`. No legality is checked.
    ///
    /// # Errors
    ///
    /// [`BoardError::IllegalEmptySource`] if `from` is empty.
    pub fn apply_move(&mut self, from: Square, to: Square, animate: bool) -> Result<Position, BoardError> {
        self.apply_moves(&[Move::new(from, to)], animate)
    }

    /// Apply `moves` in order as one position change.
    ///
    /// # Errors
    ///
    /// [`BoardError::IllegalEmptySource`] for the first move whose source is
    /// empty; none of the moves are applied.
    pub fn apply_moves(&mut self, moves: &[Move], animate: bool) -> Result<Position, BoardError> {
        self.ensure_live()?;
        match self.position.with_moves(moves) {
            Ok(next) => {
                self.transition(next.clone(), animate);
                Ok(next)
            }
            Err(e) => self.fail(e),
        }
    }

    // --- Layout ---

    /// # Errors
    ///
    /// [`BoardError::Destroyed`] after [`Board::destroy`].
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), BoardError> {
        self.ensure_live()?;
        self.request_layout(orientation);
        Ok(())
    }

    /// Flip the board and return the new orientation.
    ///
    /// # Errors
    ///
    /// [`BoardError::Destroyed`] after [`Board::destroy`].
    pub fn flip_orientation(&mut self) -> Result<Orientation, BoardError> {
        self.ensure_live()?;
        let next = self.deferred_layout.unwrap_or(self.orientation).flipped();
        self.request_layout(next);
        Ok(next)
    }

    /// Re-read the container geometry and redraw.
    ///
    /// # Errors
    ///
    /// [`BoardError::Destroyed`] after [`Board::destroy`].
    pub fn resize(&mut self) -> Result<(), BoardError> {
        self.ensure_live()?;
        self.request_layout(self.deferred_layout.unwrap_or(self.orientation));
        Ok(())
    }

    /// Tear the board down. Later calls fail with [`BoardError::Destroyed`]
    /// and animation completions are ignored.
    ///
    /// # Errors
    ///
    /// [`BoardError::Destroyed`] if already destroyed.
    pub fn destroy(&mut self) -> Result<(), BoardError> {
        self.ensure_live()?;
        self.destroyed = true;
        self.drag.abort();
        self.throttle.reset();
        let abandoned = self.scheduler.in_flight();
        self.scheduler.abandon();
        self.deferred_layout = None;
        self.renderer.teardown();
        tracing::debug!(abandoned, "board destroyed");
        Ok(())
    }

    // --- Animation ---

    /// Report that the effect behind `ticket` has finished.
    pub fn animation_complete(&mut self, ticket: AnimationTicket) {
        if self.destroyed {
            return;
        }
        match self.scheduler.complete(ticket) {
            Completion::Settled(BatchKind::Transition { old, new }) => {
                self.draw_pieces();
                self.host.on_move_end(&old, &new);
            }
            Completion::Settled(BatchKind::Settle) => self.draw_pieces(),
            Completion::Pending | Completion::Superseded | Completion::Ignored => {}
        }
    }

    // --- Pointer input ---

    /// Feed a pointer event received at `now_ms`.
    pub fn handle_pointer(&mut self, event: PointerEvent, now_ms: u64) {
        if self.destroyed {
            return;
        }
        let at = event.point();
        match event.phase {
            PointerPhase::Down => {
                self.begin_drag_at(at);
            }
            PointerPhase::Move => self.drag_move(at, now_ms),
            PointerPhase::Up => {
                self.end_drag(at);
            }
        }
    }

    pub fn handle_mouse(&mut self, input: MouseInput, now_ms: u64) {
        self.handle_pointer(input.into(), now_ms);
    }

    pub fn handle_touch(&mut self, input: &TouchInput, now_ms: u64) {
        if let Some(event) = input.to_pointer() {
            self.handle_pointer(event, now_ms);
        }
    }

    /// Deliver a throttled pointer move whose window has elapsed.
    pub fn tick(&mut self, now_ms: u64) {
        if self.destroyed || !self.drag.is_live() || !self.throttle.has_pending() {
            return;
        }
        if let Some(at) = self.throttle.poll(now_ms) {
            self.drag_to(at);
        }
    }

    /// Start dragging whatever is under `at`: a piece on the board, or a
    /// supply-pile piece when spare pieces are enabled.
    pub fn begin_drag_at(&mut self, at: Point) -> bool {
        if let Some(sq) = self.layout.locate(at).square() {
            return match self.position.get(sq) {
                Some(piece) => self.begin_drag(DragSource::Square(sq), piece, at),
                None => false,
            };
        }
        if !self.config.spare_pieces {
            return false;
        }
        match self.layout.spare_at(at) {
            Some(piece) => self.begin_drag(DragSource::Spare, piece, at),
            None => false,
        }
    }

    /// Start a drag of `piece` from `source` with the pointer at `at`.
    ///
    /// Rejected when dragging is disabled, a drag is already live, the
    /// source square does not hold `piece`, spare pieces are off for a spare
    /// source, or the host vetoes it.
    pub fn begin_drag(&mut self, source: DragSource, piece: PieceCode, at: Point) -> bool {
        if self.destroyed || !self.config.draggable || self.drag.is_live() {
            return false;
        }
        match source {
            DragSource::Square(sq) if self.position.get(sq) != Some(piece) => return false,
            DragSource::Spare if !self.config.spare_pieces => return false,
            _ => {}
        }
        if !self.host.on_drag_start(source, piece, &self.position, self.orientation) {
            tracing::debug!(%source, %piece, "drag vetoed by host");
            return false;
        }
        if !self.drag.begin(source, piece, self.layout.clone()) {
            return false;
        }

        self.throttle.reset();
        if let Some(sq) = source.square() {
            self.renderer.hide_piece(sq);
        }
        let glyph = self.glyph(piece);
        self.renderer.show_drag_glyph(&glyph, Rect::centered(at, self.layout.square_size()));
        tracing::debug!(%source, %piece, "drag started");
        true
    }

    /// Pointer moved during a drag; rate-limited by the drag throttle.
    pub fn drag_move(&mut self, at: Point, now_ms: u64) {
        if !self.drag.is_live() {
            return;
        }
        if let Some(at) = self.throttle.offer(now_ms, at) {
            self.drag_to(at);
        }
    }

    /// Resolve the live drag with the pointer released at `at`.
    ///
    /// Returns the action taken, or `None` when no drag was live.
    pub fn end_drag(&mut self, at: Point) -> Option<DropAction> {
        if self.destroyed {
            return None;
        }
        let session = self.drag.end(at)?;
        self.throttle.reset();

        let DragSession { source, piece, location: target, ref snapshot } = session;
        let previous = self.position.clone();
        let proposed = drag::proposed_position(&previous, source, target, piece);
        let decision = self.host.on_drop(&DropContext {
            source,
            target,
            piece,
            proposed,
            previous: previous.clone(),
            orientation: self.orientation,
        });
        let action = drag::resolve(decision, target, self.config.drop_off_board);
        tracing::debug!(%source, %target, %piece, ?decision, ?action, "drag resolved");

        self.renderer.clear_highlights();
        if self.commit(drag::resulting_position(&previous, source, piece, action)) {
            self.supersede_transitions();
        }

        let glyph = self.glyph(piece);
        let effect = match action {
            DropAction::Drop(sq) => Effect::Snap {
                glyph,
                to: snapshot.square_rect(sq).unwrap_or_default(),
                duration_ms: self.config.snap_speed.millis(),
            },
            DropAction::Snapback => Effect::Snapback {
                glyph,
                to: origin_rect(snapshot, source, piece),
                duration_ms: self.config.snapback_speed.millis(),
            },
            DropAction::Trash => Effect::Trash { glyph, duration_ms: self.config.trash_speed.millis() },
        };
        self.settle(effect);
        self.apply_deferred_layout();
        Some(action)
    }

    /// Abort the live drag without consulting the host. The piece snaps
    /// back to where it came from and the position is unchanged.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(session) = self.drag.abort() else {
            return false;
        };
        self.throttle.reset();
        self.renderer.clear_highlights();
        let effect = Effect::Snapback {
            glyph: self.glyph(session.piece),
            to: origin_rect(&session.snapshot, session.source, session.piece),
            duration_ms: self.config.snapback_speed.millis(),
        };
        tracing::debug!(source = %session.source, piece = %session.piece, "drag cancelled");
        self.settle(effect);
        self.apply_deferred_layout();
        true
    }

    // --- Internals ---

    fn ensure_live(&self) -> Result<(), BoardError> {
        if self.destroyed {
            tracing::debug!("call on destroyed board ignored");
            return Err(BoardError::Destroyed);
        }
        Ok(())
    }

    /// Report `err` through the invalid-input channel and return it.
    fn fail<T>(&mut self, err: BoardError) -> Result<T, BoardError> {
        self.report(&err);
        Err(err)
    }

    fn report(&mut self, err: &BoardError) {
        match self.config.invalid_input {
            InvalidInputPolicy::Console => tracing::warn!(code = err.code(), error = %err, "invalid input"),
            InvalidInputPolicy::Alert => self.host.show_alert(&err.report_text()),
            InvalidInputPolicy::Callback => self.host.on_invalid_input(err),
            InvalidInputPolicy::Disabled => {}
        }
    }

    /// Store `next` as the committed position, notifying the host first.
    /// Returns `false` when nothing changed.
    fn commit(&mut self, next: Position) -> bool {
        if next == self.position {
            return false;
        }
        self.host.on_change(&self.position, &next);
        tracing::debug!(
            from = %codec::encode(&self.position),
            to = %codec::encode(&next),
            "position committed"
        );
        self.position = next;
        true
    }

    /// Commit `next` and bring the screen up to date, animated or not.
    ///
    /// Diffs always compare committed positions, never what an unfinished
    /// batch currently shows.
    fn transition(&mut self, next: Position, animate: bool) {
        let old = self.position.clone();
        let changed = self.commit(next.clone());
        if !animate {
            if changed {
                self.supersede_transitions();
            }
            self.draw_pieces();
            return;
        }

        let animations = diff::diff(&old, &next);
        let tickets = self.scheduler.start(BatchKind::Transition { old: old.clone(), new: next.clone() }, animations.len());
        if tickets.is_empty() {
            self.draw_pieces();
            self.host.on_move_end(&old, &next);
            return;
        }
        for (ticket, animation) in tickets.into_iter().zip(&animations) {
            if let Animation::Move { source, .. } = animation {
                self.renderer.hide_piece(*source);
            }
            let effect = self.effect_for(animation);
            self.renderer.animate(ticket, effect);
        }
    }

    /// A running transition must not report `on_move_end` once the board
    /// has committed past its target without animating.
    fn supersede_transitions(&mut self) {
        if self.scheduler.transition_running() {
            self.scheduler.supersede_transitions();
            tracing::debug!(position = %codec::encode(&self.position), "running transition superseded");
        }
    }

    fn effect_for(&self, animation: &Animation) -> Effect {
        let glyph = self.glyph(animation.piece());
        match *animation {
            Animation::Move { source, destination, .. } => Effect::Slide {
                glyph,
                from: self.square_rect(source),
                to: self.square_rect(destination),
                duration_ms: self.config.move_speed.millis(),
            },
            Animation::Add { square, piece } if self.config.spare_pieces => Effect::Slide {
                glyph,
                from: self.layout.spare_rect(piece).unwrap_or_default(),
                to: self.square_rect(square),
                duration_ms: self.config.move_speed.millis(),
            },
            Animation::Add { square, .. } => Effect::Appear {
                glyph,
                at: self.square_rect(square),
                duration_ms: self.config.appear_speed.millis(),
            },
            Animation::Clear { square, .. } => Effect::Fade {
                glyph,
                at: self.square_rect(square),
                duration_ms: self.config.trash_speed.millis(),
            },
        }
    }

    /// Run the single effect that ends a drag.
    fn settle(&mut self, effect: Effect) {
        for ticket in self.scheduler.start(BatchKind::Settle, 1) {
            self.renderer.animate(ticket, effect.clone());
        }
    }

    fn drag_to(&mut self, at: Point) {
        let Some(size) = self.drag.session().map(|s| s.snapshot.square_size()) else {
            return;
        };
        self.renderer.move_drag_glyph(Rect::centered(at, size));

        let Some(change) = self.drag.hover(at) else {
            return;
        };
        if let Some(sq) = change.from.square() {
            self.renderer.set_highlight(sq, false);
        }
        if let Some(sq) = change.to.square() {
            self.renderer.set_highlight(sq, true);
        }
        let Some((source, piece)) = self.drag.session().map(|s| (s.source, s.piece)) else {
            return;
        };
        tracing::debug!(%source, from = %change.from, to = %change.to, "drag hover changed");
        self.host
            .on_drag_move(change.to, change.from, source, piece, &self.position, self.orientation);
    }

    fn request_layout(&mut self, orientation: Orientation) {
        if self.drag.is_live() {
            tracing::debug!(%orientation, "layout change deferred until drag resolves");
            self.deferred_layout = Some(orientation);
            return;
        }
        self.orientation = orientation;
        self.rebuild_layout();
    }

    fn apply_deferred_layout(&mut self) {
        if let Some(orientation) = self.deferred_layout.take() {
            self.orientation = orientation;
            self.rebuild_layout();
        }
    }

    fn rebuild_layout(&mut self) {
        let size = geometry::square_size_for_width(self.renderer.container_width());
        self.layout = GeometryCache::build(self.renderer.board_origin(), size, self.orientation, self.config.spare_pieces);
        let spares: Vec<(Glyph, Rect)> = self
            .layout
            .spares()
            .iter()
            .map(|(piece, rect)| (self.glyph(*piece), *rect))
            .collect();
        self.renderer.draw_board(&self.layout, self.config.show_notation, &spares);
        self.draw_pieces();
    }

    fn draw_pieces(&mut self) {
        let placed: Vec<PlacedGlyph> = self
            .position
            .iter()
            .filter_map(|(square, piece)| {
                self.layout
                    .square_rect(square)
                    .map(|rect| PlacedGlyph { square, rect, glyph: self.glyph(piece) })
            })
            .collect();
        self.renderer.draw_pieces(&placed);
    }

    fn square_rect(&self, square: Square) -> Rect {
        self.layout.square_rect(square).unwrap_or_default()
    }

    fn glyph(&self, piece: PieceCode) -> Glyph {
        Glyph { piece, src: self.config.piece_theme.resolve(piece) }
    }
}

/// Where a dragged piece returns to on snapback.
fn origin_rect(snapshot: &GeometryCache, source: DragSource, piece: PieceCode) -> Rect {
    match source {
        DragSource::Square(sq) => snapshot.square_rect(sq),
        DragSource::Spare => snapshot.spare_rect(piece),
    }
    .unwrap_or_default()
}
