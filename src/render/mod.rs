/// CPU frame canvas and frame readback.
pub mod canvas;
