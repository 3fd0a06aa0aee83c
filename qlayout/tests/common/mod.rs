#![allow(dead_code)]

use std::path::PathBuf;

use qlayout::bag;
use qlayout::options::OptionBag;
use qlayout::Design;

pub const BUILD_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/build");

pub fn out_path(test_name: &str, file_name: &str) -> PathBuf {
    PathBuf::from(BUILD_DIR).join(format!("tests/{test_name}/{file_name}"))
}

/// A two-by-two qubit grid on one chip, coupled along every grid edge.
pub fn grid_design() -> Design {
    let mut design = Design::new();
    design
        .generate_topology(&bag! { "row_num" => 2, "col_num" => 2 })
        .unwrap();
    let positions: OptionBag = design
        .topology()
        .positions
        .iter()
        .map(|(name, pos)| (name.clone(), *pos))
        .collect();
    design
        .generate_qubits(&bag! { "topo_positions" => positions, "dist" => 2000. })
        .unwrap();
    let qubits = design.extract().unwrap().require_bag("qubits").unwrap().clone();
    let topology = design.extract().unwrap().require_bag("topology").unwrap().clone();
    design
        .generate_coupling_lines(&bag! { "qubits_ops" => qubits.clone(), "topo_ops" => topology })
        .unwrap();
    design
        .generate_readout_lines(&bag! { "qubits_ops" => qubits.clone() })
        .unwrap();
    design
        .generate_chips(&bag! { "qubits_ops" => qubits })
        .unwrap();
    design
}
