use super::*;
use crate::config::CanvasConfig;
use crate::search::StaticCatalog;
use crate::types::Unit;
use eframe::egui;
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

/// App over the demo catalog with the initial unit list already applied.
fn test_app(rt: &tokio::runtime::Runtime) -> CanvasApp {
    let config = CanvasConfig {
        offline: true,
        ..Default::default()
    };
    let mut app = CanvasApp::new(&config, Arc::new(StaticCatalog::demo()), rt.handle().clone());
    assert!(app.search.wait_idle(Duration::from_secs(5)));
    app
}

fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;
    raw
}

/// Run one headless frame that only shows the canvas.
fn run_canvas_frame(ctx: &egui::Context, app: &mut CanvasApp, events: Vec<egui::Event>) {
    let _ = ctx.run(raw_input(events), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
}

fn press(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![
        egui::Event::PointerMoved(pos),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        },
    ]
}

fn release(pos: egui::Pos2) -> Vec<egui::Event> {
    vec![egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed: false,
        modifiers: egui::Modifiers::NONE,
    }]
}

/// Lays out the canvas once so its screen rectangle is known.
fn canvas_origin(ctx: &egui::Context, app: &mut CanvasApp) -> egui::Pos2 {
    run_canvas_frame(ctx, app, vec![]);
    app.layout.canvas_rect.expect("canvas should be laid out").min
}

#[test]
fn dragging_a_vertex_keeps_the_grab_offset() {
    let rt = runtime();
    let mut app = test_app(&rt);
    let id = match app.session.drop_unit(
        Unit::new("Jinx", ["Street Demon", "Marksman"]),
        egui::pos2(200.0, 150.0),
        0.0,
    ) {
        crate::placement::DropOutcome::Placed { vertex, .. } => vertex,
        other => panic!("expected placement, got {other:?}"),
    };

    let ctx = egui::Context::default();
    let origin = canvas_origin(&ctx, &mut app);

    // Grab off-center, then move by (40, 30).
    let grab = origin + egui::vec2(206.0, 146.0);
    run_canvas_frame(&ctx, &mut app, press(grab));
    assert_eq!(app.session.drag().dragging(), Some(id));

    let moved = grab + egui::vec2(40.0, 30.0);
    run_canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(moved)]);
    run_canvas_frame(&ctx, &mut app, release(moved));

    let position = app.session.graph().vertex(id).unwrap().position;
    assert!((position - egui::pos2(240.0, 180.0)).length() < 1e-3, "{position:?}");
    assert!(!app.session.drag().is_dragging());
    assert_eq!(app.session.viewport().pan(), egui::Vec2::ZERO);
}

#[test]
fn dragging_the_background_pans_the_view() {
    let rt = runtime();
    let mut app = test_app(&rt);
    app.session
        .drop_unit(Unit::new("Brand", ["Street Demon", "Techie"]), egui::pos2(100.0, 100.0), 0.0);

    let ctx = egui::Context::default();
    let origin = canvas_origin(&ctx, &mut app);

    let start = origin + egui::vec2(500.0, 400.0);
    let end = start + egui::vec2(50.0, -20.0);
    run_canvas_frame(&ctx, &mut app, press(start));
    assert!(app.session.viewport().is_panning());
    run_canvas_frame(&ctx, &mut app, vec![egui::Event::PointerMoved(end)]);
    run_canvas_frame(&ctx, &mut app, release(end));

    assert_eq!(app.session.viewport().pan(), egui::vec2(50.0, -20.0));
    assert!(!app.session.viewport().is_panning());
    assert_eq!(
        app.session.graph().vertices()[0].position,
        egui::pos2(100.0, 100.0)
    );
}

#[test]
fn pinch_zoom_keeps_point_under_cursor() {
    let rt = runtime();
    let mut app = test_app(&rt);
    let ctx = egui::Context::default();
    let origin = canvas_origin(&ctx, &mut app);

    let cursor = origin + egui::vec2(300.0, 200.0);
    let local = egui::pos2(300.0, 200.0);
    let before = app.session.viewport().screen_to_world(local);

    run_canvas_frame(
        &ctx,
        &mut app,
        vec![egui::Event::PointerMoved(cursor), egui::Event::Zoom(1.5)],
    );

    assert!((app.session.viewport().zoom() - 1.2).abs() < 1e-5);
    let after = app.session.viewport().screen_to_world(local);
    assert!((before - after).length() < 1e-3, "{before:?} vs {after:?}");
}

#[test]
fn press_outside_search_panel_closes_suggestions() {
    let rt = runtime();
    let mut app = test_app(&rt);
    app.search.set_query("jinx", 0.0);
    assert!(app.search.wait_idle(Duration::from_secs(5)));
    assert!(!app.search.state().results().is_empty());

    app.layout.search_panel_rect = Some(egui::Rect::from_min_size(
        egui::pos2(0.0, 700.0),
        egui::vec2(1200.0, 100.0),
    ));
    let ctx = egui::Context::default();

    let _ = ctx.run(raw_input(press(egui::pos2(40.0, 750.0))), |ctx| {
        app.dismiss_suggestions_on_outside_press(ctx);
    });
    assert!(!app.search.state().results().is_empty());

    let _ = ctx.run(raw_input(release(egui::pos2(40.0, 750.0))), |_| {});
    let _ = ctx.run(raw_input(press(egui::pos2(600.0, 300.0))), |ctx| {
        app.dismiss_suggestions_on_outside_press(ctx);
    });
    assert!(app.search.state().results().is_empty());
    assert_eq!(app.search.state().query(), "");
}

#[test]
fn initial_palette_lists_every_demo_unit() {
    let rt = runtime();
    let app = test_app(&rt);
    assert_eq!(
        app.search.state().filtered().len(),
        crate::search::demo_roster().len()
    );
}
