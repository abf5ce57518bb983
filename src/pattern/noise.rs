use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_SEED: u64 = 0;

const GRADIENTS: [[f64; 3]; 16] = [
    [1., 1., 0.],
    [-1., 1., 0.],
    [1., -1., 0.],
    [-1., -1., 0.],
    [1., 0., 1.],
    [-1., 0., 1.],
    [1., 0., -1.],
    [-1., 0., -1.],
    [0., 1., 1.],
    [0., -1., 1.],
    [0., 1., -1.],
    [0., -1., -1.],
    [1., 1., 0.],
    [0., -1., 1.],
    [-1., 1., 0.],
    [0., -1., -1.],
];

lazy_static! {
    static ref DEFAULT_TABLE: Perlin = Perlin::new(DEFAULT_SEED);
}

/// Gradient lattice noise over a seeded permutation table. Output is
/// deterministic per seed and stays within [-1, 1]; the tables are
/// read-only after construction and safe to share across render threads.
#[derive(Debug, Clone)]
pub struct Perlin {
    permutation: [usize; 512],
}

impl Perlin {
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<usize> = (0..256).collect();
        table.shuffle(&mut StdRng::seed_from_u64(seed));

        let mut permutation = [0; 512];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = table[i % 256];
        }
        Self { permutation }
    }

    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let xi = (x.floor() as i64 & 255) as usize;
        let yi = (y.floor() as i64 & 255) as usize;
        let zi = (z.floor() as i64 & 255) as usize;
        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();

        let u = fade(xf);
        let v = fade(yf);
        let w = fade(zf);

        let p = &self.permutation;
        let a = p[xi] + yi;
        let aa = p[a] + zi;
        let ab = p[a + 1] + zi;
        let b = p[xi + 1] + yi;
        let ba = p[b] + zi;
        let bb = p[b + 1] + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(
                    u,
                    gradient(p[aa], xf, yf, zf),
                    gradient(p[ba], xf - 1., yf, zf),
                ),
                lerp(
                    u,
                    gradient(p[ab], xf, yf - 1., zf),
                    gradient(p[bb], xf - 1., yf - 1., zf),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    gradient(p[aa + 1], xf, yf, zf - 1.),
                    gradient(p[ba + 1], xf - 1., yf, zf - 1.),
                ),
                lerp(
                    u,
                    gradient(p[ab + 1], xf, yf - 1., zf - 1.),
                    gradient(p[bb + 1], xf - 1., yf - 1., zf - 1.),
                ),
            ),
        )
    }
}

impl Default for Perlin {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * t.mul_add(t.mul_add(6., -15.), 10.)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    t.mul_add(b - a, a)
}

fn gradient(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let g = GRADIENTS[hash & 15];
    g[2].mul_add(z, g[0].mul_add(x, g[1] * y))
}
