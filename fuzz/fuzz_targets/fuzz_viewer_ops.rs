#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use plantkit_core::event::{KeyCode, KeyEvent, Modifiers, PointerButton};
use plantkit_core::geometry::{Point, Rect, Size};
use plantkit_core::viewer::{
    ComponentId, ControlAction, DiagramComponent, DiagramViewport, ViewerAnchors, ViewerConfig,
    ViewerEffect,
};
use std::time::Duration;

#[derive(Debug, Arbitrary)]
enum Op {
    Zoom { factor: f32, x: i16, y: i16 },
    Wheel { delta: i8, x: i16, y: i16 },
    Key { key: u8, mods: u8 },
    Control(u8),
    Down { id: u8, button: u8, x: i16, y: i16, on_component: bool },
    Move { x: i16, y: i16 },
    Up,
    Cancel,
    Leave,
    Resize { w: u16, h: u16 },
    Hover { id: u8, top: i16 },
    HoverOut { focus_within: bool },
    Blur,
    Tick(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    diagram_w: u16,
    diagram_h: u16,
    ops: Vec<Op>,
}

fn key_code(key: u8) -> KeyCode {
    match key % 9 {
        0 => KeyCode::Up,
        1 => KeyCode::Down,
        2 => KeyCode::Left,
        3 => KeyCode::Right,
        4 => KeyCode::Char('+'),
        5 => KeyCode::Char('-'),
        6 => KeyCode::Char('0'),
        7 => KeyCode::Enter,
        _ => KeyCode::Char(char::from(key)),
    }
}

fuzz_target!(|input: Input| {
    let diagram = Size::new(
        f64::from(input.diagram_w.max(1)),
        f64::from(input.diagram_h.max(1)),
    );
    let config = ViewerConfig::default();
    let Ok(mut vp) = DiagramViewport::new(
        config.clone(),
        diagram,
        Rect::new(0.0, 0.0, 800.0, 600.0),
        ViewerAnchors::ALL,
        vec![DiagramComponent::new(Some("P-101"), Some("Feed pump"))],
    ) else {
        return;
    };
    vp.mount();

    let mut held: i64 = 0;
    for op in input.ops.iter().take(512) {
        match *op {
            Op::Zoom { factor, x, y } => {
                vp.zoom_at_point(f64::from(factor), Point::new(f64::from(x), f64::from(y)));
            }
            Op::Wheel { delta, x, y } => {
                vp.wheel(f64::from(delta), Point::new(f64::from(x), f64::from(y)));
            }
            Op::Key { key, mods } => {
                let event = KeyEvent::new(key_code(key))
                    .with_modifiers(Modifiers::from_bits_truncate(mods));
                vp.key(&event);
            }
            Op::Control(n) => {
                let action = match n % 3 {
                    0 => ControlAction::ZoomIn,
                    1 => ControlAction::ZoomOut,
                    _ => ControlAction::ResetView,
                };
                vp.control(action);
            }
            Op::Down { id, button, x, y, on_component } => {
                vp.pointer_down(
                    u32::from(id),
                    PointerButton::from_dom(button),
                    Point::new(f64::from(x), f64::from(y)),
                    on_component,
                );
            }
            Op::Move { x, y } => vp.pointer_move(Point::new(f64::from(x), f64::from(y))),
            Op::Up => vp.pointer_up(),
            Op::Cancel => vp.pointer_cancel(),
            Op::Leave => vp.pointer_leave(),
            Op::Resize { w, h } => {
                vp.resize(Rect::new(0.0, 0.0, f64::from(w.max(1)), f64::from(h.max(1))));
            }
            Op::Hover { id, top } => vp.component_hover(
                ComponentId(usize::from(id % 3)),
                Rect::new(100.0, f64::from(top), 40.0, 20.0),
            ),
            Op::HoverOut { focus_within } => vp.component_hover_out(focus_within),
            Op::Blur => vp.component_blur(),
            Op::Tick(ms) => vp.advance_time(Duration::from_millis(u64::from(ms))),
        }

        let t = vp.transform();
        assert!(t.scale.is_finite() && t.translate_x.is_finite() && t.translate_y.is_finite());
        assert!(t.scale >= config.min_scale && t.scale <= config.max_scale);

        for effect in vp.drain_effects() {
            match effect {
                ViewerEffect::AcquirePointer { .. } => held += 1,
                ViewerEffect::ReleasePointer { .. } => held -= 1,
                _ => {}
            }
        }
        assert_eq!(held, i64::from(vp.is_panning()), "capture imbalance");
    }
});
