use carrier_scattering::constants::{ELECTRON_MASS, MILLI_ELECTRON_VOLT};
use carrier_scattering::scattering::{FormFactor, Transition};
use carrier_scattering::spectral::IntegrationRule;
use carrier_scattering::subband::{Heterostructure, Subband};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array1;
use rand::{thread_rng, Rng};

fn construct_test_structure(number_of_points: usize) -> Heterostructure {
    let z = Array1::linspace(0., 5e-8, number_of_points);
    let centre = 2.5e-8;
    let width = 4e-9;
    let ground = z.mapv(|position: f64| (-((position - centre) / width).powi(2) / 2.).exp());
    let excited = &ground * &z.mapv(|position| (position - centre) / width);
    let potential = Array1::from_elem(number_of_points, 300. * MILLI_ELECTRON_VOLT);
    let mass = 0.067 * ELECTRON_MASS;
    Heterostructure::new(
        z,
        potential,
        vec![
            Subband::new(0., ground, mass),
            Subband::new(50. * MILLI_ELECTRON_VOLT, excited, mass),
        ],
    )
    .unwrap()
}

pub fn bench_form_factor(c: &mut Criterion) {
    let mut rng = thread_rng();
    let momentum: f64 = rng.gen_range(1e7..1e9);
    let transition = Transition::new(2, 1, 1, 1);

    let mut group = c.benchmark_group("form_factor");

    for num_points in [128, 256, 512, 1024, 2048].iter() {
        let structure = construct_test_structure(*num_points);
        let form_factor =
            FormFactor::new(&structure, &transition, IntegrationRule::Trapezium).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(*num_points),
            num_points,
            |b, &_num_points| b.iter(|| form_factor.evaluate(black_box(momentum))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_form_factor);
criterion_main!(benches);
