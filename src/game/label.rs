use rand::seq::SliceRandom;
use rand::Rng;

const PREFIXES: &[&str] = &["Eager", "Passing", "Fo Guang", "Sleepless", "8 AM", "Outspoken"];
const NOUNS: &[&str] = &["Classmate", "Ace", "Speedster", "Warrior", "Hero", "Delegate"];

/// Random anonymous label such as `"Sleepless Hero#042"`.
pub fn player_label<R: Rng + ?Sized>(rng: &mut R) -> String {
    let prefix = PREFIXES.choose(rng).copied().unwrap_or_default();
    let noun = NOUNS.choose(rng).copied().unwrap_or_default();
    let suffix: u16 = rng.gen_range(0..999);
    format!("{} {}#{:03}", prefix, noun, suffix)
}
