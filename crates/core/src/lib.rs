//! Face-aware cropping: fit an image to a view's aspect ratio while keeping
//! the detected faces in frame.
//!
//! The crate is split by concern. `cropping` holds the crop geometry and the
//! processor built on it, `detection` the detector seam and coordinate
//! conversions, `imaging` file I/O, and `pipeline` the read → process →
//! write use case.

pub mod shared {
    pub mod aspect_ratio;
    pub mod constants;
    pub mod frame;
    pub mod rect;
}

pub mod detection {
    pub mod domain {
        pub mod coordinates;
        pub mod face_detector;
    }
    pub mod infrastructure;
}

pub mod cropping {
    pub mod domain {
        pub mod crop_geometry;
        pub mod face_aware_cropper;
        pub mod image_processor;
    }
    pub mod infrastructure;
}

pub mod imaging {
    pub mod domain {
        pub mod image_reader;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod crop_image_use_case;
}
