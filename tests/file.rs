use std::fs;
use std::path::Path;

use autumn_props::{FileNotFound, read_map, read_map_from, read_value, read_value_from, write_value};
use camino::Utf8PathBuf;

fn props_file(dir: &Path, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.join(name)).expect("temp dir should be UTF-8");
    fs::write(&path, contents).unwrap();
    path
}

fn ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {e}"))
}

mod read {
    use super::*;

    #[test]
    fn read_map_excludes_comments() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "a=1\n#b=2\nc=3\n");

        let map = ok(read_map(&path));

        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["c"], "3");
        assert!(!map.contains_key("b") && !map.contains_key("#b"));
    }

    #[test]
    fn read_map_from_stream_excludes_comments() {
        let map = ok(read_map_from("a=1\n#b=2\nc=3\n".as_bytes()));

        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["c"], "3");
    }

    #[test]
    fn read_map_excludes_escaped_hash_keys() {
        let map = ok(read_map_from("\\#not-a-comment=1\nkept=2\n".as_bytes()));

        assert_eq!(map.len(), 1);
        assert_eq!(map["kept"], "2");
    }

    #[test]
    fn read_map_keeps_values_untrimmed() {
        let map = ok(read_map_from("k = value  \n".as_bytes()));

        assert_eq!(map["k"], "value  ");
    }

    #[test]
    fn read_map_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("missing.properties")).unwrap();

        let err = read_map(&path).expect_err("file should be missing");
        let Ok(FileNotFound(missing)) = err.narrow::<FileNotFound, _>() else {
            panic!("expected FileNotFound");
        };
        assert_eq!(missing, path);
    }

    #[test]
    fn read_map_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

        assert!(read_map(&dir).is_err());
    }

    #[test]
    fn read_value_present_and_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "host=localhost\nport=8080\n");

        assert_eq!(ok(read_value(&path, "host")), "localhost");
        assert_eq!(ok(read_value(&path, " port ")), "8080");
        assert_eq!(ok(read_value(&path, "missing")), "");
    }

    #[test]
    fn read_value_from_stream() {
        assert_eq!(ok(read_value_from("a=1\n".as_bytes(), "a")), "1");
        assert_eq!(ok(read_value_from("a=1\n".as_bytes(), "b")), "");
    }

    #[test]
    fn read_value_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("missing.properties")).unwrap();

        let err = read_value(&path, "a").expect_err("file should be missing");
        assert!(err.narrow::<FileNotFound, _>().is_ok());
    }

    #[test]
    fn read_value_from_invalid_utf8_stream() {
        assert!(read_value_from(&b"a=\xff\n"[..], "a").is_err());
    }
}

mod write {
    use super::*;

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "a=1\n");

        ok(write_value(&path, "b", "hello world"));

        assert_eq!(ok(read_value(&path, "b")), "hello world");
        assert_eq!(ok(read_value(&path, "a")), "1");
    }

    #[test]
    fn write_overwrites_existing_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "a=1\nb=2\n");

        ok(write_value(&path, "a", "one"));

        let map = ok(read_map(&path));
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "one");
        assert_eq!(map["b"], "2");
    }

    #[test]
    fn write_trims_key() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "");

        ok(write_value(&path, "  spaced  ", "v"));

        assert_eq!(ok(read_value(&path, "spaced")), "v");
    }

    #[test]
    fn write_round_trips_escaped_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "");

        ok(write_value(&path, "path", "C:\\temp\\"));
        ok(write_value(&path, "motd", " café = ☕ "));

        assert_eq!(ok(read_value(&path, "path")), "C:\\temp\\");
        assert_eq!(ok(read_value(&path, "motd")), " café = ☕ ");
    }

    #[test]
    fn write_rewrites_whole_file_with_empty_header() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "app.properties", "# keep me?\nz=26\n");

        ok(write_value(&path, "a", "1"));

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#");
        assert!(lines[1].starts_with('#'));
        assert_eq!(&lines[2..], ["a=1", "z=26"]);
        assert!(!text.contains("keep me"), "comments are not preserved:\n{text}");
    }

    #[test]
    fn write_to_missing_file_fails_without_creating_it() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("missing.properties")).unwrap();

        let err = write_value(&path, "a", "1").expect_err("file should be missing");

        assert!(err.narrow::<FileNotFound, _>().is_ok());
        assert!(!path.exists());
    }

    #[test]
    fn concurrent_writers_keep_at_least_one_update() {
        let tmp = tempfile::tempdir().unwrap();
        let path = props_file(tmp.path(), "shared.properties", "base=0\n");

        std::thread::scope(|s| {
            s.spawn(|| {
                let _ = write_value(&path, "left", "1");
            });
            s.spawn(|| {
                let _ = write_value(&path, "right", "2");
            });
        });

        let map = ok(read_map(&path));
        assert!(
            map.get("left").is_some_and(|v| v == "1") || map.get("right").is_some_and(|v| v == "2"),
            "neither update survived: {map:?}"
        );
    }
}
