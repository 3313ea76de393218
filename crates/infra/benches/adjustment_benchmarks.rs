use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{DateTime, Months, NaiveDate, Utc};
use payroll_compensation::{AdjustmentPolicy, Department, Employee, PerformanceScore, evaluate, plan_batch};
use payroll_core::{DepartmentId, EmployeeId, Money};
use payroll_infra::{
    AdjustmentExecutor, BatchControl, ExecutorConfig, InMemoryAdjustmentLedger,
    InMemoryEmployeeDirectory,
};

fn at() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Staff with spread-out salaries and tenures (some capped, some with tenure bonus).
fn staff(department_id: DepartmentId, size: usize) -> Vec<Employee> {
    (0..size)
        .map(|i| {
            let joined = at()
                .date_naive()
                .checked_sub_months(Months::new((i % 12) as u32 * 12))
                .unwrap();
            Employee::new(
                EmployeeId::new(),
                format!("Employee {i}"),
                format!("employee{i}@example.com"),
                Money::from_major(40_000 + (i as i64 % 20) * 9_000).unwrap(),
                joined,
                department_id,
            )
            .unwrap()
        })
        .collect()
}

fn seeded_directory(size: usize) -> (InMemoryEmployeeDirectory, DepartmentId) {
    let directory = InMemoryEmployeeDirectory::new();
    let department = Department::new(DepartmentId::new(), "Engineering", "ENG").unwrap();
    let department_id = department.id_typed();
    directory.insert_department(department).unwrap();
    for employee in staff(department_id, size) {
        directory.insert_employee(employee).unwrap();
    }
    (directory, department_id)
}

fn bench_rule_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_evaluation");

    group.bench_function("evaluate_single", |b| {
        b.iter(|| evaluate(black_box(92), black_box(6.5)).unwrap());
    });

    group.finish();
}

fn bench_batch_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_planning");
    let policy = AdjustmentPolicy::default();
    let score = PerformanceScore::new(85).unwrap();

    for size in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("plan_batch", size), size, |b, &size| {
            let department_id = DepartmentId::new();
            let employees = staff(department_id, size);
            b.iter(|| {
                black_box(plan_batch(&policy, department_id, &employees, score, at()).unwrap());
            });
        });
    }

    group.finish();
}

fn bench_apply_adjustment(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_adjustment");

    for size in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("department_batch", size), size, |b, &size| {
            let (directory, department_id) = seeded_directory(size);
            let executor = AdjustmentExecutor::new(directory, InMemoryAdjustmentLedger::new())
                .with_config(ExecutorConfig::default().without_duplicate_guard());
            let control = BatchControl::new();

            // Salaries climb to the cap over repeated runs; the write path is the same.
            b.iter(|| {
                black_box(
                    executor
                        .apply_adjustment_at(department_id, 75, at(), &control)
                        .unwrap(),
                );
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rule_evaluation,
    bench_batch_planning,
    bench_apply_adjustment,
);
criterion_main!(benches);
