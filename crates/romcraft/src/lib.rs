//! # romcraft
//!
//! Compiles combinational logic into ROM/EEPROM images.
//!
//! Describe the address lines and data lines as named fields over explicit
//! bit positions (possibly non-contiguous), write a [generate::RomProgram]
//! that maps decoded inputs to outputs, then enumerate every address into a
//! flat binary image.
//!
//! ## Example
//!
//! ```
//! use romcraft::errors::ArgumentError;
//! use romcraft::field::Field;
//! use romcraft::generate::{RomProgram, generate_image};
//! use romcraft::geometry::RomGeometry;
//! use romcraft::layout::Layout;
//!
//! struct Parity {
//!     input: Layout,
//!     output: Layout,
//! }
//!
//! impl RomProgram for Parity {
//!     fn geometry(&self) -> RomGeometry {
//!         RomGeometry::new(4, 8, 0x00).unwrap()
//!     }
//!
//!     fn word(&self, address: u32) -> Result<u32, ArgumentError> {
//!         let nibble = self.input.get(address, "nibble")?;
//!         self.output.encode(0x00, [("odd", nibble.count_ones() & 1)])
//!     }
//! }
//!
//! let program = Parity {
//!     input: Layout::compile(&[Field::new("nibble", &[0, 1, 2, 3])], 4).unwrap(),
//!     output: Layout::compile(&[Field::bit("odd", 7)], 8).unwrap(),
//! };
//! let image = generate_image(&program).unwrap();
//! assert_eq!(image.len(), 16);
//! assert_eq!(image[0b0111], 0x80);
//! ```

pub mod assembly;
pub mod bits;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod generate;
pub mod geometry;
pub mod layout;
pub mod serial;
pub mod sink;
