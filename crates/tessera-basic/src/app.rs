use tessera_engine::coords::ColorRgba;
use tessera_engine::core::{App, Host};
use tessera_engine::event::{
    Crossing, Event, KeyCode, KeyEvent, LifecycleEvent, PaintEvent, SizeEvent, Stage, TouchEvent,
};
use tessera_engine::gl::GlContext;

use crate::config::BasicConfig;
use crate::scene::Scene;

/// Event-loop state of the demo.
///
/// The draw context and the scene exist only while the window is visible.
pub struct Basic<C> {
    config: BasicConfig,
    glctx: Option<C>,
    scene: Option<Scene>,
    size: SizeEvent,
    touch: (f32, f32),
}

impl<C: GlContext> Basic<C> {
    pub fn new(config: BasicConfig) -> Self {
        Self {
            config,
            glctx: None,
            scene: None,
            size: SizeEvent::default(),
            touch: (0.0, 0.0),
        }
    }

    /// Handles a lifecycle change. Returns the context released by leaving
    /// the visible stage so the caller decides when it is dropped.
    fn on_lifecycle(&mut self, e: LifecycleEvent, host: &mut dyn Host<Context = C>) -> Option<C> {
        match e.crosses(Stage::Visible) {
            Crossing::On => {
                let Some(mut ctx) = host.take_draw_context() else {
                    log::warn!("became visible without a draw context");
                    return None;
                };
                self.scene = Scene::start(&mut ctx, &self.config);
                self.glctx = Some(ctx);
                host.send(PaintEvent::requested().into());
                None
            }
            Crossing::Off => {
                let mut ctx = self.glctx.take()?;
                if let Some(scene) = self.scene.take() {
                    scene.stop(&mut ctx);
                }
                Some(ctx)
            }
            Crossing::None => None,
        }
    }

    fn on_size(&mut self, e: SizeEvent) {
        self.size = e;
        self.touch = ((e.width_px / 2) as f32, (e.height_px / 2) as f32);
    }

    fn on_paint(&mut self, e: PaintEvent, host: &mut dyn Host<Context = C>) {
        let Some(ctx) = self.glctx.as_mut() else { return };
        if e.external {
            // The loop repaints continuously; platform redraws would double up.
            return;
        }

        match self.scene.as_mut() {
            Some(scene) => scene.paint(ctx, &self.size),
            None => {
                ctx.clear_color(ColorRgba::white());
                ctx.clear();
            }
        }

        host.publish(ctx);
        host.send(PaintEvent::requested().into());
    }

    fn on_key(&mut self, e: KeyEvent, host: &mut dyn Host<Context = C>) {
        if e.code == KeyCode::Escape {
            host.exit(0);
        }
    }

    fn on_touch(&mut self, e: TouchEvent) {
        self.touch = (e.x, e.y);
    }
}

impl<C: GlContext> App<C> for Basic<C> {
    fn on_event(&mut self, event: Event, host: &mut dyn Host<Context = C>) {
        match event {
            Event::Lifecycle(e) => {
                let _released = self.on_lifecycle(e, host);
            }
            Event::Size(e) => self.on_size(e),
            Event::Paint(e) => self.on_paint(e, host),
            Event::Key(e) => self.on_key(e, host),
            Event::Touch(e) => self.on_touch(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tessera_engine::event::{KeyDirection, TouchKind};
    use tessera_engine::gl::{GlCall, TraceGl};

    #[derive(Default)]
    struct RecordingHost {
        pending: Option<TraceGl>,
        sent: Vec<Event>,
        publishes: usize,
        exit_code: Option<i32>,
    }

    impl RecordingHost {
        fn with_context(ctx: TraceGl) -> Self {
            Self {
                pending: Some(ctx),
                ..Self::default()
            }
        }
    }

    impl Host for RecordingHost {
        type Context = TraceGl;

        fn take_draw_context(&mut self) -> Option<TraceGl> {
            self.pending.take()
        }

        fn send(&mut self, event: Event) {
            self.sent.push(event);
        }

        fn publish(&mut self, ctx: &mut TraceGl) {
            self.publishes += 1;
            ctx.present();
        }

        fn exit(&mut self, code: i32) {
            self.exit_code = Some(code);
        }
    }

    fn app() -> Basic<TraceGl> {
        Basic::new(BasicConfig {
            snapshot_path: None,
            seed: Some(11),
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
        })
    }

    fn visible() -> Event {
        LifecycleEvent::new(Stage::Alive, Stage::Visible).into()
    }

    fn hidden() -> Event {
        LifecycleEvent::new(Stage::Visible, Stage::Alive).into()
    }

    fn requested_paint() -> Event {
        PaintEvent::requested().into()
    }

    fn calls(app: &Basic<TraceGl>) -> &[GlCall] {
        app.glctx.as_ref().map_or(&[][..], TraceGl::calls)
    }

    #[test]
    fn becoming_visible_takes_the_context_and_requests_a_paint() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());

        app.on_event(visible(), &mut host);

        assert!(app.glctx.is_some());
        assert!(app.scene.is_some());
        assert!(host.pending.is_none());
        assert_eq!(host.sent, vec![requested_paint()]);
    }

    #[test]
    fn focus_changes_do_not_restart() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        let before = calls(&app).len();

        app.on_event(LifecycleEvent::new(Stage::Visible, Stage::Focused).into(), &mut host);
        app.on_event(LifecycleEvent::new(Stage::Focused, Stage::Visible).into(), &mut host);

        assert_eq!(calls(&app).len(), before);
        assert_eq!(host.sent.len(), 1);
    }

    #[test]
    fn hiding_releases_everything_and_drops_the_context() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        app.on_event(SizeEvent::new(320, 240, 1.0).into(), &mut host);
        app.on_event(requested_paint(), &mut host);

        let Event::Lifecycle(off) = hidden() else { unreachable!() };
        let gl = app.on_lifecycle(off, &mut host).expect("context handed back");

        assert!(app.glctx.is_none());
        assert!(app.scene.is_none());
        assert_eq!((gl.live_programs(), gl.live_buffers(), gl.live_textures()), (0, 0, 0));
        assert!(gl.calls().iter().any(|c| matches!(c, GlCall::DeleteProgram(_))));
        assert!(gl.calls().iter().any(|c| matches!(c, GlCall::DeleteBuffer(_))));
    }

    #[test]
    fn visible_again_starts_from_scratch() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        app.on_event(hidden(), &mut host);
        assert!(app.glctx.is_none());

        host.pending = Some(TraceGl::new());
        app.on_event(visible(), &mut host);

        assert!(app.scene.is_some());
        assert!(matches!(calls(&app).first(), Some(GlCall::CreateProgram(_))));
        assert_eq!(host.sent, vec![requested_paint(), requested_paint()]);
    }

    #[test]
    fn hiding_twice_is_harmless() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        app.on_event(hidden(), &mut host);
        app.on_event(hidden(), &mut host);
        assert!(app.glctx.is_none());
    }

    #[test]
    fn paint_without_context_does_nothing() {
        let mut app = app();
        let mut host = RecordingHost::default();

        app.on_event(requested_paint(), &mut host);

        assert_eq!(host.publishes, 0);
        assert!(host.sent.is_empty());
    }

    #[test]
    fn external_paint_is_ignored() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        let before = calls(&app).len();

        app.on_event(PaintEvent::external().into(), &mut host);

        assert_eq!(calls(&app).len(), before);
        assert_eq!(host.publishes, 0);
        assert_eq!(host.sent.len(), 1);
    }

    #[test]
    fn each_paint_publishes_once_and_requests_the_next() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        app.on_event(SizeEvent::new(640, 480, 1.0).into(), &mut host);
        host.sent.clear();

        for n in 1..=3 {
            app.on_event(requested_paint(), &mut host);
            assert_eq!(host.publishes, n);
            assert_eq!(host.sent.len(), n);
        }
        assert!(host.sent.iter().all(|e| *e == requested_paint()));
        assert_eq!(calls(&app).last(), Some(&GlCall::Present));
    }

    #[test]
    fn failed_program_still_clears_and_publishes() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::failing_programs());
        app.on_event(visible(), &mut host);
        assert!(app.glctx.is_some());
        assert!(app.scene.is_none());

        app.on_event(requested_paint(), &mut host);

        assert_eq!(
            calls(&app),
            &[GlCall::ClearColor(ColorRgba::white()), GlCall::Clear, GlCall::Present]
        );
        assert_eq!(host.publishes, 1);
    }

    #[test]
    fn resize_centers_the_touch_point() {
        let mut app = app();
        let mut host = RecordingHost::default();

        app.on_event(SizeEvent::new(801, 601, 2.0).into(), &mut host);

        assert_eq!(app.touch, (400.0, 300.0));
        assert_eq!(app.size.width_px, 801);
    }

    #[test]
    fn touch_overwrites_the_point_unchecked() {
        let mut app = app();
        let mut host = RecordingHost::default();
        app.on_event(SizeEvent::new(100, 100, 1.0).into(), &mut host);

        let touch = TouchEvent {
            x: -5.0,
            y: 1e6,
            sequence: 0,
            kind: TouchKind::Move,
        };
        app.on_event(touch.into(), &mut host);

        assert_eq!(app.touch, (-5.0, 1e6));
    }

    #[test]
    fn escape_exits_with_zero() {
        let mut app = app();
        let mut host = RecordingHost::default();

        app.on_event(KeyEvent::press(KeyCode::Escape).into(), &mut host);

        assert_eq!(host.exit_code, Some(0));
    }

    #[test]
    fn other_keys_change_nothing() {
        let mut app = app();
        let mut host = RecordingHost::with_context(TraceGl::new());
        app.on_event(visible(), &mut host);
        app.on_event(SizeEvent::new(200, 100, 1.0).into(), &mut host);
        let (size, touch, n_calls) = (app.size, app.touch, calls(&app).len());

        for code in [KeyCode::A, KeyCode::Enter, KeyCode::Space] {
            let mut key = KeyEvent::press(code);
            key.direction = KeyDirection::Release;
            app.on_event(key.into(), &mut host);
        }

        assert_eq!(host.exit_code, None);
        assert_eq!((app.size, app.touch), (size, touch));
        assert_eq!(calls(&app).len(), n_calls);
        assert_eq!(host.sent.len(), 1);
    }
}
