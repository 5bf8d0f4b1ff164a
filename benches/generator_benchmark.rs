use criterion::{black_box, criterion_group, criterion_main, Criterion};
use struct_to_iots::descriptor::TypeRef;
use struct_to_iots::generator::{GeneratorOptions, TypeGenerator};
use struct_to_iots::parser::parse_schema;

const SAMPLE_SCHEMA: &str = r#"
    {
        "package": "game",
        "enums": [
            {
                "name": "Class",
                "type": "string",
                "constants": [
                    { "name": "Warrior", "value": "warrior" },
                    { "name": "Mage", "value": "mage" }
                ]
            }
        ],
        "structs": [
            {
                "name": "Weapon",
                "fields": [
                    { "name": "Name", "type": "string", "json": "name" },
                    { "name": "Damage", "type": "int", "json": "damage" }
                ]
            },
            {
                "name": "Character",
                "fields": [
                    { "name": "Name", "type": "string", "json": "name" },
                    { "name": "Class", "type": "Class", "json": "class" },
                    { "name": "Weapons", "type": "[]*Weapon", "json": "weapons,omitempty" },
                    { "name": "Party", "type": "[]Character", "json": "party" },
                    { "name": "Extra", "type": "map[string]interface{}", "json": "extra" }
                ]
            }
        ]
    }
"#;

fn benchmark_parse_schema(c: &mut Criterion) {
    c.bench_function("parse_schema", |b| {
        b.iter(|| parse_schema(black_box(SAMPLE_SCHEMA)))
    });
}

fn benchmark_generate(c: &mut Criterion) {
    let graph = parse_schema(SAMPLE_SCHEMA).unwrap();
    let root = TypeRef::Struct(graph.find_struct("Character").unwrap());

    c.bench_function("generate_io_ts", |b| {
        b.iter(|| {
            TypeGenerator::io_ts(GeneratorOptions::default()).generate(black_box(&graph), black_box(&root))
        })
    });

    c.bench_function("generate_interfaces", |b| {
        b.iter(|| {
            TypeGenerator::interface(GeneratorOptions::default())
                .generate(black_box(&graph), black_box(&root))
        })
    });
}

criterion_group!(benches, benchmark_parse_schema, benchmark_generate);
criterion_main!(benches);
