//! voxel_mesh - Framework/engine independent voxel surface extraction and
//! mesh decimation.
//!
//! This crate turns regions of an 8-bit voxel field into indexed triangle
//! meshes and simplifies those meshes while preserving visually
//! significant features. It targets applications that edit volumetric
//! worlds at runtime: destructible terrain, sculpting tools, volumetric
//! level editors.
//!
//! # Features
//!
//! - **Marching-cubes extraction**: region-based, with vertex sharing
//!   between adjacent cells through an incremental two-slice cache
//! - **Level of detail**: decimated sampling at steps of `1 << level`
//! - **Edge-collapse decimation**: material boundaries stay rigid, region
//!   faces stay matched with neighbouring regions, face flips are
//!   rejected
//! - **Gradient estimators**: simple, central-difference and Sobel
//!   kernels for smooth post-extraction normals
//!
//! # Example
//!
//! ```
//! use voxel_mesh::{decimate, extract_surface, DenseVolume, SurfaceMesh, VolumeSampler};
//!
//! // A 16³ volume with a solid 6³ box in the middle.
//! let mut volume = DenseVolume::new(16, 16, 16);
//! for z in 5..11 {
//!   for y in 5..11 {
//!     for x in 5..11 {
//!       volume.set(x, y, z, 255);
//!     }
//!   }
//! }
//!
//! let mesh = extract_surface(&volume, volume.enclosing_region(), 0);
//! assert!(!mesh.is_empty());
//!
//! // Simplify: coplanar faces collapse, the box stays a box.
//! let mut simplified = SurfaceMesh::new();
//! decimate(&mesh, &mut simplified, 0.95);
//! assert!(simplified.triangle_count() <= mesh.triangle_count());
//! ```

pub mod region;
pub mod tables;
pub mod volume;

pub use region::Region;
pub use tables::{EDGE_CORNERS, EDGE_TABLE, TRI_TABLE};
pub use volume::{DenseVolume, VolumeSampler};

// Mesh container and vertex types
pub mod mesh;
pub use mesh::{FlatVertex, LodRecord, MeshVertex, SurfaceMesh, SurfaceVertex};

// Surface extraction
pub mod extractor;
pub use extractor::{extract_surface, SurfaceExtractor};

// Mesh simplification
pub mod decimator;
pub use decimator::{decimate, MeshDecimator};

// Post-extraction normal estimation
pub mod gradient;
pub use gradient::{
  central_difference_gradient, compute_normal, simple_gradient, sobel_gradient, GradientMethod,
};
