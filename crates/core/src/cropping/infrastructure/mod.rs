pub mod face_aware_processor;
