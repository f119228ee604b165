//! Integration tests for `dsift catalog` and custom catalogs.

mod util;

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn builtin_catalog_names_in_scoring_order()
{
    let dir = util::make_workspace();
    let out = util::dsift(&dir)
        .args(["catalog", "--json"])
        .output()
        .expect("run catalog");
    assert!(out.status.success());

    let v: Value = serde_json::from_slice(&out.stdout).expect("json");
    let names: Vec<&str> = v["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();

    assert_eq!(v["version"], "1");
    insta::assert_yaml_snapshot!(names, @r#"
    - dsa
    - oop
    - dbms
    - web-development
    - java
    - python
    - sql
    - os
    - networking
    - aptitude
    - machine-learning
    - git
    "#);
}

#[test]
fn configured_catalog_drives_tags()
{
    let dir = util::make_workspace();
    dir.child("catalog.toml")
        .write_str(
            "version = \"campus-2\"\n\n\
             [[categories]]\nname = \"rust\"\nkeywords = [\"borrow\", \"lifetime\"]\n\n\
             [[categories]]\nname = \"go\"\nkeywords = [\"goroutine\"]\n",
        )
        .unwrap();
    dir.child("doubtsift.toml")
        .write_str("catalog_path = \"catalog.toml\"\n")
        .unwrap();

    util::dsift(&dir)
        .args(["tags", "--title", "Borrow checker errors"])
        .args(["--description", "Why does this lifetime not live long enough"])
        .assert()
        .success()
        .stdout("rust\n");
}

#[test]
fn duplicate_category_is_rejected()
{
    let dir = util::make_workspace();
    dir.child("bad.toml")
        .write_str("version = \"x\"\n[[categories]]\nname = \"a\"\nkeywords = []\n[[categories]]\nname = \"a\"\nkeywords = []\n")
        .unwrap();

    util::dsift(&dir)
        .args(["catalog", "--file", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog.categories[1].name"));
}

#[test]
fn init_writes_config_once()
{
    let dir = util::make_workspace();

    util::dsift(&dir)
        .arg("init")
        .assert()
        .success();
    dir.child("doubtsift.toml")
        .assert(predicate::str::contains("[analysis.weights]"));

    util::dsift(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
