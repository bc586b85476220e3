pub mod application {
    pub mod batch {
        pub mod isolator;
    }
    pub mod payment {
        pub mod reconcile;
        pub mod submit;
    }
    pub mod toll {
        pub mod get_by_plate;
        pub mod ingest_image;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod batch {
        pub mod errors;
        pub mod handler;
        pub mod isolation;
        pub mod model;
        pub mod queue;
    }
    pub mod payment {
        pub mod errors;
        pub mod model;
        pub mod use_cases {
            pub mod reconcile;
            pub mod submit;
        }
    }
    pub mod shared {
        pub mod plate;
    }
    pub mod toll {
        pub mod errors;
        pub mod events;
        pub mod model;
        pub mod repository;
        pub mod services;
        pub mod value_objects;
        pub mod use_cases {
            pub mod get_by_plate;
            pub mod ingest_image;
        }
    }
}
