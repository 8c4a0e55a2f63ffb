use boolean::{
    deserialize, serialize, ClientKey, CompressedCiphertext, ParametersSet, PublicKey, ServerKey,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("keygen");
    group.sample_size(10);
    for set in ParametersSet::ALL {
        let params = boolean::get_parameters(set);
        let mut rng = StdRng::from_entropy();
        let ck = ClientKey::new_with_rng(&params, &mut rng).unwrap();
        group.bench_function(format!("server_key/{set}"), |b| {
            b.iter(|| black_box(ServerKey::new_with_rng(&ck, &mut rng)))
        });
        group.bench_function(format!("public_key/{set}"), |b| {
            b.iter(|| black_box(PublicKey::new_with_rng(&ck, &mut rng)))
        });
    }
    group.finish();
}

fn bench_encrypt(c: &mut Criterion) {
    let mut rng = StdRng::from_entropy();
    let params = boolean::get_parameters(ParametersSet::Default);
    let ck = ClientKey::new_with_rng(&params, &mut rng).unwrap();
    let pk = PublicKey::new_with_rng(&ck, &mut rng);
    let ct = ck.encrypt_with_rng(true, &mut rng);
    let cct = ck.encrypt_compressed_with_rng(true, &mut rng);
    let cct_bytes = serialize(&cct).unwrap();

    c.bench_function("encrypt", |b| {
        b.iter(|| black_box(ck.encrypt_with_rng(true, &mut rng)))
    });
    c.bench_function("public_key_encrypt", |b| {
        b.iter(|| black_box(pk.encrypt_with_rng(true, &mut rng)))
    });
    c.bench_function("decrypt", |b| b.iter(|| black_box(ck.decrypt(&ct))));
    c.bench_function("decompress", |b| {
        b.iter(|| {
            let cct = deserialize::<CompressedCiphertext>(cct_bytes.as_view()).unwrap();
            black_box(cct.decompress())
        })
    });
}

criterion_group!(benches, bench_keygen, bench_encrypt);
criterion_main!(benches);
