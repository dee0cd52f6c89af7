use std::hash::{BuildHasherDefault, Hasher};

/// Hasher for vertex index keys.
///
/// Keys are small integers which are already well distributed, so only a multiplicative mix is applied.
#[derive(Default)]
pub struct VertexHasher {
    state: u64,
}

impl Hasher for VertexHasher {
    fn write(&mut self, bytes: &[u8]) {
        // wide keys fold into the state instead of shifting out
        for byte in bytes {
            self.state = self.state.rotate_left(8) ^ *byte as u64;
        }
    }

    fn write_u16(&mut self, value: u16) {
        self.state = value as u64;
    }

    fn write_u32(&mut self, value: u32) {
        self.state = value as u64;
    }

    fn finish(&self) -> u64 {
        self.state.wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }
}

pub type BuildVertexHasher = BuildHasherDefault<VertexHasher>;
