use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use prims_core::shape::make_contiguous_strides_for;
use prims_core::{DType, Device, DtypeDefaults, Operand, Shape, TensorMeta};
use prims_ops::{PromotionKind, can_safe_cast_to, elementwise_dtypes, higher_dtype};

fn bench_elementwise_dtypes(c: &mut Criterion) {
    let defaults = DtypeDefaults::default();
    let a = TensorMeta::contiguous(Shape::new(vec![64, 64]), DType::F16, Device::Gpu(0)).unwrap();
    let b = TensorMeta::contiguous(Shape::new(vec![64, 64]), DType::BF16, Device::Gpu(0)).unwrap();
    let zero_dim = TensorMeta::contiguous(Shape::scalar(), DType::F64, Device::Cpu).unwrap();
    let int = TensorMeta::contiguous(Shape::new(vec![64]), DType::I32, Device::Gpu(0)).unwrap();
    let operands = [
        Operand::from(&a),
        Operand::from(&b),
        Operand::from(&zero_dim),
        Operand::from(&int),
        Operand::from(2i64),
        Operand::from(0.5f64),
    ];

    let kinds: &[(PromotionKind, &str)] = &[
        (PromotionKind::Default, "default"),
        (PromotionKind::OpMath, "op_math"),
        (PromotionKind::IntToFloat, "int_to_float"),
        (PromotionKind::ComplexToFloat, "complex_to_float"),
        (PromotionKind::BoolToLong, "bool_to_long"),
        (PromotionKind::AlwaysBool, "always_bool"),
    ];

    let mut group = c.benchmark_group("elementwise_dtypes");
    for &(kind, name) in kinds {
        group.bench_function(BenchmarkId::new("mixed_operands", name), |bench| {
            bench.iter(|| elementwise_dtypes(black_box(&operands), kind, &defaults));
        });
    }
    group.finish();
}

fn bench_dtype_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("dtype_lattice");

    group.bench_function("higher_dtype_all_pairs", |bench| {
        bench.iter(|| {
            let mut acc = None;
            for a in DType::ALL {
                for b in DType::ALL {
                    acc = higher_dtype(acc, higher_dtype(black_box(Some(a)), black_box(Some(b))));
                }
            }
            acc
        });
    });

    group.bench_function("can_safe_cast_all_pairs", |bench| {
        bench.iter(|| {
            let mut hits = 0u32;
            for a in DType::ALL {
                for b in DType::ALL {
                    hits += u32::from(can_safe_cast_to(black_box(a), black_box(b)));
                }
            }
            hits
        });
    });

    group.finish();
}

fn bench_contiguous_strides(c: &mut Criterion) {
    let shapes: &[(&str, &[i64])] = &[
        ("rank4", &[8, 64, 64, 16]),
        ("rank8", &[2, 2, 2, 2, 2, 2, 2, 2]),
    ];

    let mut group = c.benchmark_group("contiguous_strides");
    for &(name, dims) in shapes {
        let shape = Shape::new(dims.to_vec());
        group.bench_function(BenchmarkId::new("make", name), |bench| {
            bench.iter(|| make_contiguous_strides_for(black_box(&shape)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_elementwise_dtypes,
    bench_dtype_lattice,
    bench_contiguous_strides
);
criterion_main!(benches);
