//! # Round-Trip Regression Test
//!
//! End-to-end checks through the public API: every library round-trips both
//! payload kinds for both APIs, the table codec reproduces hand-built
//! payloads, and payloads loaded from disk verify like generated ones.
//!
//! A failure here means a library adapter, the table codec or the harness
//! no longer reproduces the reference payload.

use jsonbench::model::{Friend, User};
use jsonbench::schema::{mapping, UsersFb};
use jsonbench::{
    Api, BenchConfig, BenchSupport, Clients, Dataset, JsonBench, JsonBenchmark, JsonSource,
    Library, Outcome, Report, Users,
};
use tempfile::tempdir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run<T: Dataset>(config: &BenchConfig) -> Report {
    let mut report = Report::new();
    for api in Api::ALL {
        let harness = JsonBenchmark::<T>::from_config(config, api).unwrap();
        report.merge(harness.run_all());
    }
    report
}

fn alice() -> Users {
    Users {
        users: vec![User {
            id: "5f1a".to_string(),
            index: 0,
            guid: "c0ffee00-0000-4000-8000-000000000001".to_string(),
            is_active: true,
            balance: "$1,000.00".to_string(),
            picture: "http://placehold.it/32x32".to_string(),
            age: 30,
            eye_color: "green".to_string(),
            name: "Alice".to_string(),
            gender: "female".to_string(),
            company: "ACME".to_string(),
            email: "alice@acme.com".to_string(),
            phone: "+1 (555) 010-0000".to_string(),
            address: "1 Main Street, Springfield".to_string(),
            about: "Likes tables.".to_string(),
            registered: "2020-01-01T00:00:00 -00:00".to_string(),
            latitude: 45.5,
            longitude: -122.25,
            tags: vec!["alpha".to_string(), "beta".to_string()],
            friends: vec![Friend {
                id: "0".to_string(),
                name: "Bob".to_string(),
            }],
            greeting: "Hello, Alice!".to_string(),
            favorite_fruit: "apple".to_string(),
        }],
    }
}

mod library_tests {
    use super::*;

    #[test]
    fn every_library_round_trips_users() {
        init_logging();
        let report = run::<Users>(&BenchConfig::new());

        assert!(report.is_success(), "{}", report);
        assert_eq!(report.passed(), Library::ALL.len() * Api::ALL.len());
    }

    #[test]
    fn every_capable_library_round_trips_clients() {
        init_logging();
        let report = run::<Clients>(&BenchConfig::new());

        assert!(report.is_success(), "{}", report);
        assert_eq!(report.passed(), (Library::ALL.len() - 2) * Api::ALL.len());
        assert_eq!(report.skipped(), 2 * Api::ALL.len());
    }

    #[test]
    fn larger_payload_round_trips() {
        init_logging();
        let config = BenchConfig::new().payload_kb(32).seed(77);
        let report = run::<Users>(&config);

        assert!(report.is_success(), "{}", report);
    }

    #[test]
    fn different_seeds_still_pass() {
        for seed in [1, 2, 3] {
            let config = BenchConfig::new().seed(seed);
            assert!(run::<Clients>(&config).is_success());
        }
    }
}

mod table_codec_tests {
    use super::*;

    #[test]
    fn single_user_named_alice() {
        let bytes = mapping::serialize(&alice());

        let root = UsersFb::root(&bytes).unwrap();
        assert_eq!(root.users_length(), 1);

        let user = root.users(0).unwrap();
        assert_eq!(user.name(), Some("Alice"));
        assert_eq!(user.age(), 30);
        assert!(user.is_active());
        assert_eq!(user.tags_length(), 2);
        assert_eq!(user.friends(0).unwrap().name(), Some("Bob"));
    }

    #[test]
    fn alice_survives_the_owned_round_trip() {
        let users = alice();
        let decoded = mapping::deserialize(&mapping::serialize(&users)).unwrap();

        assert_eq!(decoded, users);
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let bytes = mapping::serialize(&alice());

        for cut in [0, 3, bytes.len() / 2] {
            assert!(mapping::deserialize(&bytes[..cut]).is_err(), "cut at {}", cut);
        }
    }
}

mod source_tests {
    use super::*;

    #[test]
    fn payload_from_file_passes_the_harness() {
        init_logging();
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, serde_json::to_string_pretty(&alice()).unwrap()).unwrap();

        for api in Api::ALL {
            let source = JsonSource::<Users>::from_json_file(&path).unwrap();
            assert_eq!(source.canonical(), &alice());

            let support = BenchSupport::for_kind(Users::KIND);
            let bench = JsonBench::new(source, support, api).unwrap();
            let harness = JsonBenchmark::with_default_iterations(bench, alice()).unwrap();

            for lib in Library::ALL {
                assert_eq!(harness.test(lib), Outcome::Passed, "{} {}", lib, api);
            }
        }
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = JsonSource::<Users>::from_json_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.json"));
    }

    #[test]
    fn wrong_payload_kind_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clients.json");
        std::fs::write(&path, "{\"clients\": 5}").unwrap();

        assert!(JsonSource::<Clients>::from_json_file(&path).is_err());
    }
}
