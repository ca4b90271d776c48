use ndarray::{arr1, arr2, Array2};

use cuh2::gateway::{self, HostMatrix, HostValue};
use cuh2::{PotentialAdapter, StorageOrder};

mod data;
use self::data::Recording;

// this is the only test in this binary, so the collected data is not shared
// with concurrent evaluations
#[test]
fn evaluation_timings() {
    time_graph::enable_data_collection(true);
    time_graph::clear_collected_data();

    let adapter = PotentialAdapter::new(Recording::new(-1.0, 1.0));
    let positions = arr2(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
    let atomic_numbers = arr1(&[29, 1]);
    let cell = Array2::from_diag(&arr1(&[10.0, 10.0, 10.0]));
    adapter.evaluate(positions.view(), atomic_numbers.view(), cell.view()).unwrap();

    let inputs = vec![
        HostValue::Double(HostMatrix::new(2, 3, StorageOrder::ColumnMajor, vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0]).unwrap()),
        HostValue::Int32(HostMatrix::new(1, 2, StorageOrder::ColumnMajor, vec![29, 1]).unwrap()),
        HostValue::Double(HostMatrix::new(3, 3, StorageOrder::ColumnMajor, cell.t().iter().copied().collect()).unwrap()),
    ];
    gateway::call(&adapter, &inputs, 1).unwrap();

    time_graph::enable_data_collection(false);
    let graph = time_graph::get_full_graph();

    let json = graph.as_json();
    for span in [
        "cuh2::adapter::PotentialAdapter::evaluate",
        "cuh2::adapter::PotentialAdapter::validate",
        "cuh2::adapter::PotentialAdapter::marshal",
        "cuh2::adapter::ForceEvaluator::compute",
        "cuh2::gateway::gateway::call",
    ] {
        assert!(json.contains(span), "missing {} in {}", span, json);
    }

    let table = graph.as_short_table();
    assert!(table.contains("PotentialAdapter::evaluate"));
    assert!(table.contains("gateway::call"));

    let table = graph.as_table();
    assert!(table.contains("cuh2::adapter::PotentialAdapter::evaluate"));
}
