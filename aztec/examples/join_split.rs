use aztec::{
    Address, ProofData, SetupConfig, SimulatedSetup, construct_join_split, generate_commitment,
    verify_join_split,
};
use bn128::ScalarField;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = StdRng::seed_from_u64(42);
    let setup = SimulatedSetup::random(&mut rng, SetupConfig::default()).expect("setup");
    let sender: Address = "0x7b1b5fdfb6bb4cc9f0c14ab4f3a44d8c1e8d2a10"
        .parse()
        .expect("address");

    // redeem 5 of 30 to the public balance
    let notes = [10, 20, 15, 10]
        .into_iter()
        .map(|value| generate_commitment(&setup, value, &mut rng))
        .collect::<Result<Vec<_>, _>>()
        .expect("notes");
    let k_public = ScalarField::from_u64(5);

    let proof = construct_join_split(&notes, 2, sender, k_public, &mut rng).expect("construct");
    let proof_bytes = bincode::serialize(&proof).expect("serialize proof");
    info!(bytes = proof_bytes.len(), challenge = %proof.challenge_hex(), "proof built");

    for (index, tuple) in proof.to_hex_tuples().iter().enumerate() {
        info!(index, kbar = %tuple[0], gamma_x = %tuple[2], "note");
    }

    let proof2: ProofData = bincode::deserialize(&proof_bytes).expect("deserialize proof");
    verify_join_split(&proof2, 2, sender, k_public).expect("verify");
    info!("proof verified");
}
