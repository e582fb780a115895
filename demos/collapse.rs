// demos/collapse.rs
//
// Collapses a small seeded gas cloud under self-gravity and SPH pressure,
// merging dense clusters into stars along the way. Run with
// `RUST_LOG=info cargo run --example collapse` to watch star formation.

use rand::rngs::StdRng;
use rand::SeedableRng;

use rs_starform::init::init_spherical_cloud;
use rs_starform::particles::ParticleStore;
use rs_starform::simulation::{Simulation, SimulationSettings};
use rs_starform::snapshots::write_star_registry;
use rs_starform::starform::StarFormationParams;
use rs_starform::utils::SimConstants;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut store = ParticleStore::new(400);
    let mut rng = StdRng::seed_from_u64(42);
    init_spherical_cloud(&mut store, 1.0, &mut rng);

    let constants = SimConstants::new(None, Some(0.02), Some(0.6), Some(2.0e-3));
    let settings = SimulationSettings {
        star_formation: StarFormationParams {
            neighbor_radius: 0.15,
            min_neighbors: 10,
            min_density: 8.0,
            linking_length: 0.1,
            cluster_mass_threshold: 15.0,
        },
        ..Default::default()
    };

    let mut sim = Simulation::new(store, constants, settings)?;

    let output_dir = std::env::temp_dir().join("rs_starform_collapse");
    println!("writing snapshots to {}", output_dir.display());
    sim.run_with_output(500, 100, &output_dir)?;

    println!(
        "done: t={:.3}, {} alive particles, {} stars formed",
        sim.time(),
        sim.particles().count_alive(),
        sim.stars().len()
    );
    for (i, star) in sim.stars().stars().iter().enumerate() {
        println!(
            "  star {}: mass {:.3} at ({:.3}, {:.3}, {:.3}), formed t={:.3}",
            i, star.mass, star.x, star.y, star.z, star.formation_time
        );
    }

    let star_file = output_dir.join("stars.csv");
    write_star_registry(sim.stars(), &star_file)?;
    println!("star registry written to {}", star_file.display());

    Ok(())
}
