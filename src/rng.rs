use rand::prelude::*;

/// Per-trial random number generator. Seedable and, with the `serde` feature,
/// serialisable so a checkpointed trial replays the same draws.
#[repr(transparent)]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RngBytes"))]
#[cfg_attr(feature = "serde", serde(into = "RngBytes"))]
pub struct RngState(pub SmallRng);

impl RngState {
    #[inline]
    pub fn seed_from_u64(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw from `0..bound`. Returns 0 for an empty range.
    #[inline]
    pub fn draw(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        self.0.gen_range(0..bound)
    }

    /// Skips one draw.
    #[inline]
    pub fn advance(&mut self) {
        let _ = self.0.next_u64();
    }

    /// Face of a die with `faces` faces, numbered from 1.
    #[inline]
    pub fn roll(&mut self, faces: u8) -> u8 {
        if faces == 0 {
            return 0;
        }
        self.0.gen_range(1..=faces)
    }
}

impl RngCore for RngState {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(target_pointer_width = "64")]
type RngBytes = [u64; 4];
#[cfg(not(target_pointer_width = "64"))]
type RngBytes = [u32; 4];

// SmallRng in rand 0.8 is Xoshiro256PlusPlus { s: [u64; 4] } on 64-bit targets
// and Xoshiro128PlusPlus { s: [u32; 4] } elsewhere.

impl RngState {
    #[inline]
    fn to_bytes(&self) -> &RngBytes {
        unsafe { std::mem::transmute::<&SmallRng, &RngBytes>(&self.0) }
    }

    #[inline]
    fn from_bytes(bytes: RngBytes) -> Self {
        Self(unsafe { std::mem::transmute::<RngBytes, SmallRng>(bytes) })
    }
}

impl PartialEq for RngState {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for RngState {}

impl From<RngBytes> for RngState {
    fn from(value: RngBytes) -> Self {
        Self::from_bytes(value)
    }
}

impl From<RngState> for RngBytes {
    fn from(value: RngState) -> Self {
        *value.to_bytes()
    }
}

impl From<SmallRng> for RngState {
    fn from(value: SmallRng) -> Self {
        Self(value)
    }
}
