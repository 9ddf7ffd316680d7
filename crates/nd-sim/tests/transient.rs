//! End-to-end transient behavior of small circuits.

use nd_core::units::{ampere, farad, ohm, second, volt};
use nd_core::{NodeId, Tolerances, nearly_equal};
use nd_elements::{Capacitor, DcCurrentSource, DcVoltageSource, Resistor};
use nd_sim::{Circuit, RunOptions, SimConfig, SimState, run};
use proptest::prelude::*;

const DT: f64 = 1e-4;

/// GND/A/B RC network: V1 = 1 V at A, R1 = 500 Ω A-B, R2 = 1 kΩ B-GND,
/// C1 = 100 nF B-GND, starting uncharged.
fn rc_network() -> Circuit {
    let cfg = SimConfig::with_step(second(DT)).zero_initial_voltage(true);
    let mut c = Circuit::new(cfg).unwrap();
    let gnd = c.add_reference_node("GND");
    let a = c.add_node_named("A");
    let b = c.add_node_named("B");
    c.add_resistor(Resistor::new("R1", a, b, ohm(500.0))).unwrap();
    c.add_resistor(Resistor::new("R2", b, gnd, ohm(1000.0))).unwrap();
    c.add_capacitor(Capacitor::new("C1", b, gnd, farad(1e-7)))
        .unwrap();
    c.add_voltage_source(DcVoltageSource::new("V1", a, gnd, volt(1.0)))
        .unwrap();
    c
}

#[test]
fn rc_network_charges_towards_divider_voltage() {
    let mut c = rc_network();
    assert_eq!(c.dimension(), 3);
    assert_eq!(c.state(), SimState::Ready);

    c.step().unwrap();
    assert_eq!(c.node_voltage("B"), Some(0.0));

    let mut prev = 0.0;
    let mut prev_increment = f64::INFINITY;
    for _ in 0..15 {
        c.step().unwrap();
        let vb = c.node_voltage("B").unwrap();
        assert!(vb > prev, "V(B) must rise: {vb} <= {prev}");
        assert!(vb < 2.0 / 3.0);
        assert!(vb - prev < prev_increment);
        assert!((c.node_voltage("A").unwrap() - 1.0).abs() < 1e-9);
        prev_increment = vb - prev;
        prev = vb;
    }
    for _ in 0..30 {
        c.step().unwrap();
    }
    assert!((c.node_voltage("B").unwrap() - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(c.node_voltage("GND"), Some(0.0));
}

#[test]
fn rc_network_follows_backward_euler_law() {
    let mut c = rc_network();
    let r_th = 500.0 * 1000.0 / 1500.0;
    let tau = r_th * 1e-7;
    let v_final = 2.0 / 3.0;
    let ratio = 1.0 / (1.0 + DT / tau);

    // The forced-zero first step is n = 0.
    c.step().unwrap();
    for n in 1..=8 {
        c.step().unwrap();
        let expected = v_final * (1.0 - ratio.powi(n));
        let vb = c.node_voltage("B").unwrap();
        assert!(
            nearly_equal(vb, expected, Tolerances::default()),
            "step {n}: got {vb}, expected {expected}"
        );
    }
}

#[test]
fn capacitor_history_uses_previous_voltage() {
    let mut c = rc_network();
    c.step().unwrap();
    c.step().unwrap();
    c.step().unwrap();

    let vb = c.node_voltage("B").unwrap();
    let vb_prev = c.previous_voltage("B").unwrap();
    assert!((vb_prev - 0.5).abs() < 1e-9);
    assert!((vb - 0.625).abs() < 1e-9);

    // Row of B carries the history current of C1, assembled from the
    // voltage committed before the last step.
    let g = 1e-7 / DT;
    assert_eq!(c.node_index("B"), Some(2));
    assert!((c.rhs()[1] - g * 0.5).abs() < 1e-12);
}

#[test]
fn voltage_divider_ratio() {
    let mut c = Circuit::new(SimConfig::default()).unwrap();
    let gnd = c.add_reference_node("0");
    let top = c.add_node_named("top");
    let mid = c.add_node_named("mid");
    c.add_voltage_source(DcVoltageSource::new("Vs", top, gnd, volt(12.0)))
        .unwrap();
    c.add_resistor(Resistor::new("Ra", top, mid, ohm(2_000.0)))
        .unwrap();
    c.add_resistor(Resistor::new("Rb", mid, gnd, ohm(1_000.0)))
        .unwrap();

    c.step().unwrap();
    assert!((c.node_voltage("mid").unwrap() - 4.0).abs() < 1e-9);
    assert!((c.branch_current("Vs").unwrap() + 12.0 / 3_000.0).abs() < 1e-12);
}

#[test]
fn re_registration_leaves_system_unchanged() {
    let mut c = rc_network();
    let lhs = c.lhs().clone();
    let rhs = c.rhs().clone();

    let a = c.add_node_named("A");
    let b = c.nodes().id_of("B").unwrap();
    assert!(!c.add_resistor(Resistor::new("R1", a, b, ohm(7.0))).unwrap());
    assert!(!c.add_capacitor(Capacitor::new("C1", a, b, farad(1.0))).unwrap());

    assert_eq!(c.lhs(), &lhs);
    assert_eq!(c.rhs(), &rhs);
    assert_eq!(c.elements().len(), 4);
}

#[test]
fn reset_then_rerun_reproduces_trajectory() {
    let mut c = rc_network();
    let opts = RunOptions {
        steps: 12,
        record_every: 1,
    };
    let first = run(&mut c, &opts).unwrap();

    c.reset();
    for name in ["GND", "A", "B"] {
        assert_eq!(c.node_voltage(name), Some(0.0));
        assert_eq!(c.previous_voltage(name), Some(0.0));
    }
    assert_eq!(c.time(), 0.0);
    assert_eq!(c.last_time(), 0.0);

    let second = run(&mut c, &opts).unwrap();
    assert_eq!(first.t, second.t);
    assert_eq!(first.voltages, second.voltages);
}

#[test]
fn topology_change_between_steps() {
    let mut c = rc_network();
    c.step().unwrap();
    c.step().unwrap();

    let b = c.nodes().id_of("B").unwrap();
    let gnd = c.nodes().id_of("GND").unwrap();
    c.add_current_source(DcCurrentSource::new("I1", b, gnd, ampere(1e-3)))
        .unwrap();
    assert_eq!(c.state(), SimState::Ready);
    assert_eq!(c.dimension(), 3);

    // Steady state moves by I·R_th.
    for _ in 0..60 {
        c.step().unwrap();
    }
    let expected = 2.0 / 3.0 + 1e-3 * (1000.0 / 3.0);
    assert!((c.node_voltage("B").unwrap() - expected).abs() < 1e-9);
}

proptest! {
    #[test]
    fn kcl_holds_in_resistive_network(
        r in proptest::collection::vec(1.0f64..1e4, 5),
        i in -1.0f64..1.0,
    ) {
        let mut c = Circuit::new(SimConfig::default()).unwrap();
        let gnd = c.add_reference_node("GND");
        let n1 = c.add_node_named("N1");
        let n2 = c.add_node_named("N2");
        let n3 = c.add_node_named("N3");
        let links = [(n1, gnd), (n1, n2), (n2, n3), (n3, gnd), (n1, n3)];
        for (k, &(a, b)) in links.iter().enumerate() {
            c.add_resistor(Resistor::new(format!("R{k}"), a, b, ohm(r[k]))).unwrap();
        }
        c.add_current_source(DcCurrentSource::new("I1", n2, gnd, ampere(i))).unwrap();
        c.step().unwrap();

        let v = |id: NodeId| c.nodes().get(id).unwrap().voltage();
        for (node, injected) in [(n1, 0.0), (n2, i), (n3, 0.0)] {
            let leaving: f64 = links
                .iter()
                .zip(&r)
                .map(|(&(a, b), &rk)| {
                    let flow = (v(a) - v(b)) / rk;
                    if a == node { flow } else if b == node { -flow } else { 0.0 }
                })
                .sum();
            prop_assert!((leaving - injected).abs() < 1e-8 * (1.0 + i.abs()));
        }
    }
}
