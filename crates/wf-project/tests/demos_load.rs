use std::path::Path;

#[test]
fn demos_load_build_and_solve() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let demos = ["three_in_a_row.yaml", "jensen_pair.json"];

    for name in demos {
        let path = root.join(name);
        let project =
            wf_project::load(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        let problem = wf_project::build_simulation(&project)
            .unwrap_or_else(|e| panic!("Failed to build {}: {}", name, e));
        let solutions = wf_solver::solve(&problem)
            .unwrap_or_else(|e| panic!("Failed to solve {}: {}", name, e));
        assert_eq!(solutions.len(), problem.ambient.case_count(), "{name}");
        assert!(solutions.iter().all(|s| s.farm_power() > 0.0), "{name}");
    }
}

#[test]
fn northerly_pair_wakes_the_southern_turbine() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/jensen_pair.json");
    let project = wf_project::load(&path).unwrap();
    let problem = wf_project::build_simulation(&project).unwrap();
    let solution = &wf_solver::solve(&problem).unwrap()[0];

    let north = solution.turbine_by_name("north").unwrap();
    let south = solution.turbine_by_name("south").unwrap();
    assert!((north.effective_speed - 9.0).abs() < 1e-9);
    assert!(south.effective_speed < north.effective_speed);
}
