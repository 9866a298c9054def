//! End-to-end scenarios for both components, driven the way a host would.

use plantkit_core::event::{KeyCode, KeyEvent, PointerButton};
use plantkit_core::geometry::{Point, Rect};
use plantkit_core::viewer::{
    declared_diagram_size, ComponentId, DiagramComponent, DiagramViewport, ViewTransform,
    ViewerAnchors, ViewerConfig, ViewerEffect,
};
use plantkit_core::wizard::recommend::{CAVITATION_URGENT, IMPELLER_INSPECTION, TREND_FOLLOW_UP};
use plantkit_core::wizard::{Question, Suction, Symptom, WizardController, WizardEffect};
use pretty_assertions::assert_eq;

fn wizard() -> WizardController {
    let titles = ["Symptom", "Suction", "Fluid", "Summary"].map(Some);
    let mut w = WizardController::new(titles).expect("four steps");
    w.mount("");
    w.drain_effects();
    w
}

#[test]
fn blocked_advance_keeps_step_and_shows_error() {
    let mut w = wizard();
    w.select(Question::Symptom, "noise").expect("known option");
    assert!(w.advance());
    assert_eq!(w.index(), 1);
    assert_eq!(w.answers().symptom, Some(Symptom::Noise));
    w.drain_effects();

    assert!(!w.advance());
    assert_eq!(w.index(), 1);
    assert_eq!(
        w.drain_effects(),
        vec![WizardEffect::StepError {
            question: Question::Suction,
            visible: true,
        }]
    );
    assert_eq!(w.answers().suction, None::<Suction>);
}

#[test]
fn cavitation_walkthrough_ends_with_full_plan() {
    let mut w = wizard();
    for (question, value) in [
        (Question::Symptom, "noise"),
        (Question::Suction, "below-limit"),
        (Question::Fluid, "gas"),
    ] {
        w.select(question, value).expect("known option");
        assert!(w.advance());
    }
    assert_eq!(w.index(), 3);
    assert_eq!(w.location_fragment(), "#step-4");
    let effects = w.drain_effects();
    assert!(effects.contains(&WizardEffect::NavButtons {
        back_disabled: false,
        next_disabled: true,
    }));
    assert_eq!(
        effects.last(),
        Some(&WizardEffect::Announce {
            text: "Now on step 4 of 4: Summary.".to_owned()
        })
    );

    let actions = w.summary().actions;
    assert!(actions.contains(&CAVITATION_URGENT));
    assert!(actions.contains(&IMPELLER_INSPECTION));
    assert_eq!(actions.last(), Some(&TREND_FOLLOW_UP));
}

#[test]
fn deep_link_then_back_button() {
    let mut w = WizardController::new([None::<&str>, None, None, None]).expect("steps");
    w.mount("#step-3");
    assert_eq!(w.index(), 2);
    w.drain_effects();

    w.hash_changed("#step-1");
    assert_eq!(w.index(), 0);
    let effects = w.drain_effects();
    assert!(!effects
        .iter()
        .any(|e| matches!(e, WizardEffect::ReplaceFragment { .. })));
    assert_eq!(
        effects.last(),
        Some(&WizardEffect::Announce {
            text: "Now on step 1 of 4: Step 1.".to_owned()
        })
    );
}

#[test]
fn viewer_reset_centers_declared_diagram() {
    let diagram = declared_diagram_size(Some("1200"), Some("600"));
    let mut vp = DiagramViewport::new(
        ViewerConfig::default(),
        diagram,
        Rect::new(40.0, 120.0, 800.0, 600.0),
        ViewerAnchors::ALL,
        vec![DiagramComponent::new(Some("P-101"), Some("Feed pump"))],
    )
    .expect("default config");
    vp.mount();
    assert_eq!(vp.transform(), ViewTransform::new(1.0, -200.0, 0.0));

    vp.key(&KeyEvent::new(KeyCode::Char('+')));
    vp.pointer_down(3, PointerButton::Primary, Point::new(400.0, 400.0), false);
    vp.pointer_move(Point::new(460.0, 380.0));
    vp.pointer_up();
    assert_ne!(vp.transform().scale, 1.0);
    vp.drain_effects();

    vp.reset_view(true);
    assert_eq!(vp.transform(), ViewTransform::new(1.0, -200.0, 0.0));
    assert_eq!(
        vp.drain_effects(),
        vec![
            ViewerEffect::FadeTooltip,
            ViewerEffect::Highlight { component: None },
            ViewerEffect::Transform {
                css: "translate(-200px, 0px) scale(1)".to_owned(),
                scale_label: Some("100%".to_owned()),
            },
            ViewerEffect::Announce {
                text: "View reset to 100 percent scale.".to_owned(),
            },
        ]
    );
}

#[test]
fn tooltip_follows_canvas_offset() {
    let mut vp = DiagramViewport::new(
        ViewerConfig::default(),
        declared_diagram_size(None, None),
        Rect::new(40.0, 120.0, 800.0, 600.0),
        ViewerAnchors::ALL,
        vec![DiagramComponent::new(Some("P-101"), Some("Feed pump"))],
    )
    .expect("default config");
    vp.mount();
    vp.drain_effects();

    vp.component_hover(ComponentId(0), Rect::new(240.0, 420.0, 60.0, 30.0));
    let effects = vp.drain_effects();
    assert_eq!(
        effects.last(),
        Some(&ViewerEffect::ShowTooltip {
            component: 0,
            label: "P-101".to_owned(),
            detail: "Feed pump".to_owned(),
            left: 230.0,
            top: 300.0,
            flip: false,
        })
    );
}
