//! Demo driver: walks every operation family of the engine and prints the
//! observed behavior.

use anyhow::Result;
use bytes::Bytes;
use forgekv::{EngineConfig, KvEngine, Sweeper, Ttl};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("forgekv demo starting");

    // Optional config file path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let sweep_interval = Duration::from_millis(config.sweep_interval_ms);

    let engine = Arc::new(KvEngine::with_config(config));
    let _sweeper = Sweeper::start(Arc::clone(&engine), sweep_interval);

    scalar_demo(&engine)?;
    hash_demo(&engine)?;
    set_demo(&engine)?;
    list_demo(&engine)?;

    engine.flush_all();
    println!();
    println!("All keys have been deleted");
    show_keys(&engine);

    let stats = engine.stats();
    info!(
        live_keys = stats.live_keys,
        expired_removed = stats.expired_removed,
        "demo finished"
    );

    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("=== {} ===", title);
}

fn text(bytes: &Bytes) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn show_keys(engine: &KvEngine) {
    let keys: Vec<String> = engine.keys().iter().map(text).collect();
    if keys.is_empty() {
        println!("Keys list is empty");
    } else {
        println!("All keys are: {}", keys.join(", "));
    }
}

fn show_ttl(engine: &KvEngine, key: &Bytes) {
    match engine.ttl(key) {
        Ttl::Remaining(secs) => println!("The ttl of {} is {}s", text(key), secs),
        Ttl::Persistent => println!("The {} key has no expiration", text(key)),
        Ttl::Absent => println!("The {} key doesn't exist", text(key)),
    }
}

fn show_set(name: &str, set: &HashSet<Bytes>) {
    let mut members: Vec<String> = set.iter().map(text).collect();
    members.sort();
    println!("The {} set: {{{}}}", name, members.join(", "));
}

fn scalar_demo(engine: &KvEngine) -> Result<()> {
    heading("scalar operations");

    engine.set("any_key_1", "any_value_1");
    engine.set("any_key_2", "any_value_2");
    engine.set("any_key_3", "any_value_3");
    show_keys(engine);

    for key in [Bytes::from("any_key_1"), Bytes::from("non_existent_key")] {
        match engine.get(&key)? {
            Some(value) => println!("Value for key {} is {}", text(&key), text(&value)),
            None => println!("Value for key {} is absent", text(&key)),
        }
    }

    for key in [Bytes::from("any_key_3"), Bytes::from("non_existent_key")] {
        if engine.del(&key) {
            println!("The key {} has been deleted", text(&key));
        } else {
            println!("The key {} doesn't exist", text(&key));
        }
    }

    engine.set("any_key_2", "10");
    let value = engine.incr(&Bytes::from("any_key_2"))?;
    println!("any_key_2 incremented to {}", value);

    for key in [Bytes::from("any_key_1"), Bytes::from("non_existent_key")] {
        if engine.exists(&key) {
            println!("The {} key exists", text(&key));
        } else {
            println!("The {} key doesn't exist", text(&key));
        }
    }

    show_ttl(engine, &Bytes::from("any_key_1"));
    show_ttl(engine, &Bytes::from("non_existent_key"));

    for key in [Bytes::from("any_key_1"), Bytes::from("any_key_4")] {
        match engine.get_set(&key, "new_value")? {
            Some(old) => println!("The outdated value of {} was {}", text(&key), text(&old)),
            None => println!("The new key {} created", text(&key)),
        }
    }

    let key = Bytes::from("any_key_1");
    engine.expire(&key, 10);
    show_ttl(engine, &key);
    engine.persist(&key);
    show_ttl(engine, &key);
    engine.persist(&Bytes::from("non_existent_key"));

    Ok(())
}

fn hash_demo(engine: &KvEngine) -> Result<()> {
    heading("hash operations");

    let name = Bytes::from("hash_1");
    for (field, value) in [
        ("field_1", "value_1"),
        ("field_2", "value_2"),
        ("field_3", "value_2"),
    ] {
        engine.hset(name.clone(), field, value)?;
        println!("The {} hash gained the {} field", text(&name), field);
    }

    if let Some(value) = engine.hget(&name, &Bytes::from("field_1"))? {
        println!("The value of field_1 is {}", text(&value));
    }

    for (field, value) in engine.hgetall(&name)? {
        println!("The value of {} is {}", text(&field), text(&value));
    }

    let fields = vec![
        Bytes::from("field_1"),
        Bytes::from("field_2"),
        Bytes::from("field_3"),
    ];
    let removed = engine.hdel(&name, &fields)?;
    println!("Amount of deleted fields is {}", removed);
    println!("Fields left: {}", engine.hgetall(&name)?.len());

    Ok(())
}

fn set_demo(engine: &KvEngine) -> Result<()> {
    heading("set operations");

    let s1 = Bytes::from("set_1");
    let s2 = Bytes::from("set_2");

    let added = engine.sadd(s1.clone(), &[Bytes::from("value_1"), Bytes::from("value_2")])?;
    println!("To set_1 passed {} values", added);
    let added = engine.sadd(s1.clone(), &[Bytes::from("value_3")])?;
    println!("To set_1 passed {} values", added);
    show_set("set_1", &engine.smembers(&s1)?);

    if let Some(member) = engine.spop(&s1)? {
        println!("Popped {} from set_1", text(&member));
    }
    show_set("set_1", &engine.smembers(&s1)?);

    engine.sadd(s2.clone(), &[Bytes::from("value_1"), Bytes::from("value_4")])?;
    show_set("set_1", &engine.smembers(&s1)?);
    show_set("set_2", &engine.smembers(&s2)?);

    let names = vec![s1, s2];
    show_set("union", &engine.sunion(&names)?);
    show_set("difference", &engine.sdiff(&names)?);
    show_set("intersection", &engine.sinter(&names)?);

    Ok(())
}

fn list_demo(engine: &KvEngine) -> Result<()> {
    heading("list operations");

    let name = Bytes::from("list_1");

    let len = engine.lpush(name.clone(), &[Bytes::from("value_1"), Bytes::from("value_2")])?;
    println!("List length after lpush is {}", len);
    let len = engine.rpush(name.clone(), &[Bytes::from("value_3")])?;
    println!("List length after rpush is {}", len);

    let show = |items: Vec<Bytes>| {
        let rendered: Vec<String> = items.iter().map(text).collect();
        println!("The list_1 list is [{}]", rendered.join(", "));
    };
    show(engine.lrange(&name, 0, -1)?);

    if let Some(value) = engine.lpop(&name)? {
        println!("The left value was {}", text(&value));
    }
    show(engine.lrange(&name, 0, -1)?);

    if let Some(value) = engine.rpop(&name)? {
        println!("The right value was {}", text(&value));
    }
    show(engine.lrange(&name, 0, -1)?);

    Ok(())
}
