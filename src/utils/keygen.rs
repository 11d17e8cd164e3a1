use rand::rngs::OsRng;
use rand::RngCore;

const SECRET_LEN: usize = 32;

fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut bytes);
    hex::encode_upper(bytes)
}

fn main() {
    // Print a fresh verifier secret; storing it is up to the operator
    let secret = generate_secret();
    eprintln!("Generated a {}-byte secret. Set it as SECRET_KEY for both the verifier and the issuer.", SECRET_LEN);
    println!("{}", secret);
}
