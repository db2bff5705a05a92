//! Geometric properties of packed and simulated layouts
//!
//! Each test builds a layout through the public API, runs the simulation and
//! checks invariants that must hold for any dataset: no overlap, containment,
//! nesting, monotone sizing and sign stability.

use pretty_assertions::assert_eq;

use spend_bubbles::data::{CategoryEntry, TerritoryRecord};
use spend_bubbles::layout::{BubbleLayout, LayoutConfig};
use spend_bubbles::simulation::{Frame, Simulation, SimulationConfig};
use spend_bubbles::{Category, Dataset, Measure};

const EPS: f64 = 1e-6;

fn record(id: usize, region: &str, diff: f64, diff_percent: f64) -> TerritoryRecord {
    TerritoryRecord {
        territory_id: id.to_string(),
        territory_name: format!("Territory {}", id),
        region_id: region.to_string(),
        region_name: format!("Region {}", region),
        categories: vec![CategoryEntry {
            category: Category::Groceries.label().to_string(),
            diff,
            diff_percent,
            years: vec![],
        }],
    }
}

fn dataset(spec: &[(&str, f64)]) -> Dataset {
    Dataset::new(
        spec.iter()
            .enumerate()
            .map(|(i, (region, diff))| record(i, region, *diff, diff / 10.0))
            .collect(),
    )
}

/// `regions` regions with `per_region` territories each, values spread 1..=23
fn generated(regions: usize, per_region: usize) -> Dataset {
    Dataset::new(
        (0..regions * per_region)
            .map(|i| {
                let magnitude = ((i * 37) % 23 + 1) as f64;
                let diff = if i % 3 == 0 { -magnitude } else { magnitude };
                record(i, &format!("r{}", i % regions), diff, diff / 7.0)
            })
            .collect(),
    )
}

fn build(dataset: &Dataset, measure: Measure, width: f64, height: f64) -> BubbleLayout {
    BubbleLayout::build(
        dataset,
        Category::Groceries,
        measure,
        width,
        height,
        &LayoutConfig::default(),
    )
    .expect("layout should build")
}

fn settled(dataset: &Dataset, width: f64, height: f64) -> (Frame, f64) {
    let layout = build(dataset, Measure::Currency, width, height);
    let padding = layout.scales.collision_padding;
    let mut sim = Simulation::new(layout, &SimulationConfig::default());
    sim.run(300);
    (sim.frame(1), padding)
}

fn scenarios() -> Vec<Dataset> {
    vec![
        dataset(&[("R1", 100.0), ("R2", -20.0), ("R2", -20.0)]),
        dataset(&[
            ("a", 10.0),
            ("b", 40.0),
            ("c", -25.0),
            ("a", 7.0),
            ("d", 3.0),
            ("c", 12.0),
        ]),
        generated(6, 3),
        generated(8, 4),
        generated(12, 3),
    ]
}

const CONTAINERS: [(f64, f64); 3] = [(800.0, 600.0), (600.0, 800.0), (1024.0, 768.0)];

#[test]
fn test_no_overlap_after_300_ticks() {
    for data in scenarios() {
        for (w, h) in CONTAINERS {
            let (frame, padding) = settled(&data, w, h);
            for (i, a) in frame.regions.iter().enumerate() {
                for b in &frame.regions[i + 1..] {
                    let d = (a.x - b.x).hypot(a.y - b.y);
                    assert!(
                        d >= a.radius + b.radius + padding - EPS,
                        "{} and {} overlap in {}x{}: gap {}",
                        a.region_id,
                        b.region_id,
                        w,
                        h,
                        d - a.radius - b.radius
                    );
                }
            }
        }
    }
}

#[test]
fn test_contained_after_300_ticks() {
    for data in scenarios() {
        for (w, h) in CONTAINERS {
            let (frame, _) = settled(&data, w, h);
            for r in &frame.regions {
                assert!(r.x - r.radius >= -EPS, "{} leaves left edge", r.region_id);
                assert!(r.x + r.radius <= w + EPS, "{} leaves right edge", r.region_id);
                assert!(r.y - r.radius >= -EPS, "{} leaves top edge", r.region_id);
                assert!(r.y + r.radius <= h + EPS, "{} leaves bottom edge", r.region_id);
            }
        }
    }
}

#[test]
fn test_territories_inside_region() {
    for data in scenarios() {
        let (frame, _) = settled(&data, 800.0, 600.0);
        for t in &frame.territories {
            let region = frame.region(t.region).expect("owning region in frame");
            let d = (t.x - region.x).hypot(t.y - region.y);
            assert!(
                d + t.radius <= region.radius + EPS,
                "territory {} escapes region {}",
                t.territory_id,
                region.region_id
            );
        }
    }
}

#[test]
fn test_radius_monotone_in_value() {
    let data = generated(4, 6);
    let layout = build(&data, Measure::Currency, 800.0, 600.0);
    for region in layout.packed.regions() {
        let leaves: Vec<_> = region
            .children
            .iter()
            .map(|&id| layout.packed.node(id))
            .collect();
        for a in &leaves {
            for b in &leaves {
                if a.value < b.value {
                    assert!(a.r < b.r, "smaller value got the larger radius");
                }
            }
        }
    }
}

#[test]
fn test_sign_independent_of_measure() {
    // Percent signs deliberately disagree with currency signs
    let data = Dataset::new(vec![
        record(1, "a", 10.0, -3.0),
        record(2, "a", -4.0, 2.0),
        record(3, "b", 0.0, 1.0),
    ]);
    let signs = |measure| {
        let layout = build(&data, measure, 800.0, 600.0);
        let sim = Simulation::new(layout, &SimulationConfig::default());
        let mut signs: Vec<_> = sim
            .frame(1)
            .territories
            .into_iter()
            .map(|t| (t.territory_id, t.is_positive))
            .collect();
        signs.sort();
        signs
    };
    let currency = signs(Measure::Currency);
    assert_eq!(currency, signs(Measure::Percent));
    assert_eq!(
        currency,
        vec![
            ("1".to_string(), true),
            ("2".to_string(), false),
            ("3".to_string(), false)
        ]
    );
}

#[test]
fn test_pinned_region_reports_pin_position() {
    let data = generated(5, 3);
    let layout = build(&data, Measure::Currency, 800.0, 600.0);
    let mut sim = Simulation::new(layout, &SimulationConfig::default());
    let region = sim.nodes()[2].id;

    sim.pin(region, 321.5, 123.25);
    for _ in 0..20 {
        sim.tick();
        let frame = sim.frame(1);
        let r = frame.region(region).unwrap();
        assert_eq!((r.x, r.y), (321.5, 123.25));
    }

    sim.unpin(region);
    let node = sim.node(region).unwrap();
    assert_eq!((node.vx, node.vy), (0.0, 0.0));
}

#[test]
fn test_larger_region_gets_larger_bubble() {
    let data = dataset(&[("R1", 100.0), ("R2", -20.0), ("R2", -20.0)]);
    let (frame, _) = settled(&data, 800.0, 600.0);
    assert_eq!(frame.regions.len(), 2);
    let (r1, r2) = (&frame.regions[0], &frame.regions[1]);
    assert_eq!(r1.region_id, "R1");
    assert!(r1.radius > r2.radius);
    for r in &frame.regions {
        assert!(r.x - r.radius >= -EPS && r.x + r.radius <= 800.0 + EPS);
        assert!(r.y - r.radius >= -EPS && r.y + r.radius <= 600.0 + EPS);
    }
}

#[test]
fn test_click_on_settled_layout_is_bounded() {
    for data in scenarios() {
        let layout = build(&data, Measure::Currency, 800.0, 600.0);
        let mut sim = Simulation::new(layout, &SimulationConfig::default());
        sim.run(300);
        let before: Vec<_> = sim.nodes().iter().map(|n| (n.x, n.y)).collect();

        sim.boost_velocities(3.0, 10.0);
        sim.tick();

        for (node, (x, y)) in sim.nodes().iter().zip(before) {
            assert!((node.x - x).abs() <= 30.0);
            assert!((node.y - y).abs() <= 30.0);
        }
    }
}

#[test]
fn test_layout_is_deterministic() {
    let data = generated(7, 3);
    let (a, _) = settled(&data, 800.0, 600.0);
    let (b, _) = settled(&data, 800.0, 600.0);
    assert_eq!(a, b);
}
