use super::*;

/// Render the same inputs into independent recorders and assert identical output.
fn assert_deterministic(
    renderer: ConnectionRenderer,
    geom: &ConnectionGeometry,
    st: &ConnectionState,
    type_id: &str,
    selected: bool,
    iterations: usize,
) {
    let reference = render(renderer, geom, st, type_id, selected);
    for i in 1..iterations {
        let output = render(renderer, geom, st, type_id, selected);
        assert_eq!(reference, output, "Non-deterministic render on iteration {}", i);
    }
}

#[test]
fn idle_render_deterministic() {
    assert_deterministic(
        ConnectionRenderer::default(),
        &geometry(false),
        &state(false),
        "Integer",
        false,
        20,
    );
}

#[test]
fn every_state_combination_deterministic() {
    for hovered in [false, true] {
        for requires_port in [false, true] {
            for selected in [false, true] {
                assert_deterministic(
                    ConnectionRenderer::default(),
                    &geometry(hovered),
                    &state(requires_port),
                    "Double",
                    selected,
                    5,
                );
            }
        }
    }
}

#[test]
fn debug_overlay_render_deterministic() {
    let geom = ConnectionGeometry::new(Pos2::new(300.0, 40.0), Pos2::new(20.0, 220.0));
    assert_deterministic(ConnectionRenderer::new(true), &geom, &state(false), "", true, 10);
}

#[test]
fn renderer_is_shareable_across_threads() {
    let renderer = ConnectionRenderer::default();
    let reference = render(renderer, &geometry(true), &state(false), "Image", false);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                render(renderer, &geometry(true), &state(false), "Image", false)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), reference);
    }
}
