use rand::Rng;

/// Fixed pool of artist names for the optional style prefix.
pub const ARTISTS: &[&str] = &[
    "Banksy",
    "Claude Monet",
    "Salvador Dali",
    "Vincent Van Gogh",
    "Pablo Picasso",
    "Andy Warhol",
    "Frida Kahlo",
    "Leonardo da Vinci",
    "Henri Matisse",
    "Georgia O'Keeffe",
    "Jackson Pollock",
    "Gustav Klimt",
    "Edvard Munch",
    "Katsushika Hokusai",
    "Wassily Kandinsky",
    "Rene Magritte",
    "Johannes Vermeer",
    "Yayoi Kusama",
];

/// Draws one artist uniformly at random from the fixed pool.
pub fn pick<R: Rng>(rng: &mut R) -> &'static str {
    ARTISTS[rng.random_range(0..ARTISTS.len())]
}
