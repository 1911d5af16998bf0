use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotel_reservations::persistence::{encode_record, parse_record};
use hotel_reservations::{ReservationManager, RoomBlock, RoomInventory, ValidationRules};
use rand::{seq::SliceRandom, thread_rng};

fn hotel_with_rooms(room_count: u32) -> ReservationManager {
    let blocks = [
        RoomBlock::new(1_000, "Single", 1, room_count / 2),
        RoomBlock::new(100_000, "Double", 2, room_count - room_count / 2),
    ];
    ReservationManager::new(
        RoomInventory::from_blocks(&blocks).expect("valid blocks"),
        ValidationRules::default(),
    )
}

// Reserve then check out every room in random order
pub fn reservation_cycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservation_cycle");

    for room_count in [13u32, 100, 1_000].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(room_count),
            room_count,
            |b, &room_count| {
                let mut numbers: Vec<u32> = hotel_with_rooms(room_count)
                    .inventory()
                    .iter()
                    .map(|room| room.number)
                    .collect();
                numbers.shuffle(&mut thread_rng());

                b.iter(|| {
                    let mut manager = hotel_with_rooms(room_count);
                    for &number in &numbers {
                        let booking = manager.reserve(number, "Guest", "9876543210", "Passport");
                        let _ = black_box(booking);
                    }
                    for &number in &numbers {
                        let _ = black_box(manager.checkout(number));
                    }
                });
            },
        );
    }

    group.finish();
}

pub fn record_codec_benchmark(c: &mut Criterion) {
    let mut manager = hotel_with_rooms(1_000);
    let numbers: Vec<u32> = manager.inventory().iter().map(|room| room.number).collect();
    for number in numbers {
        manager
            .reserve(number, "Asha Rao", "9876543210", "Aadhar")
            .expect("room is free");
    }
    let lines: Vec<String> = manager.ledger().iter().map(encode_record).collect();

    c.bench_function("encode_ledger_1000", |b| {
        b.iter(|| {
            manager
                .ledger()
                .iter()
                .map(|reservation| black_box(encode_record(reservation)).len())
                .sum::<usize>()
        })
    });

    c.bench_function("parse_ledger_1000", |b| {
        b.iter(|| {
            lines
                .iter()
                .enumerate()
                .filter(|(index, line)| parse_record(black_box(line), index + 1).is_ok())
                .count()
        })
    });
}

criterion_group!(benches, reservation_cycle_benchmark, record_codec_benchmark);
criterion_main!(benches);
