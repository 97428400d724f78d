use std::time::Instant;

use anyhow::Result;
use kmerbin::{
    human, BinaryRecordReader, BinaryRecordWriter, GroupPartitioner, Record,
};
use rand::Rng;

fn main() -> Result<()> {
    let num_records = 1_000_000;
    let kmer_length = 21;
    let split_bits = 4;

    println!("kmerbin shard roundtrip");
    println!("=======================");
    println!("records: {}", num_records);

    let partitioner = GroupPartitioner::<u64>::new(kmer_length, split_bits)?;
    let num_groups = partitioner.num_groups() as usize;

    // random keys over the full 2L-bit space, with small counts
    let mut rng = rand::rng();
    let key_mask = (1u64 << (2 * kmer_length as u32)) - 1;
    let records: Vec<Record<u64, u32>> = (0..num_records)
        .map(|_| Record::new(rng.random::<u64>() & key_mask, rng.random_range(1..100)))
        .collect();

    // shard to one file per group
    let write_start = Instant::now();
    let dir = std::env::temp_dir().join(format!("kmerbin_demo_{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let shard_path = |grp: usize| {
        dir.join(format!("shard_{:02}.kmc", grp))
            .to_string_lossy()
            .into_owned()
    };

    let mut writers: Vec<_> = (0..num_groups)
        .map(|grp| BinaryRecordWriter::<_, u64, u32>::from_path(shard_path(grp)))
        .collect::<kmerbin::Result<_>>()?;
    for record in &records {
        let (grp, key_in_group) = partitioner.split(record.key);
        writers[grp as usize].write_record(Record::new(key_in_group, record.value))?;
    }
    let mut total_bytes = 0u64;
    for mut writer in writers {
        writer.finish()?;
        total_bytes += writer.records_written() * Record::<u64, u32>::WIRE_SIZE as u64;
    }
    println!(
        "wrote {} across {} shards in {:.2?}",
        human(total_bytes),
        num_groups,
        write_start.elapsed()
    );

    // read every shard back and recombine the keys
    let read_start = Instant::now();
    let mut restored = 0usize;
    for grp in 0..num_groups {
        let reader = BinaryRecordReader::<_, u64, u32>::from_path(shard_path(grp))?;
        for result in reader {
            let record = result?;
            let key = partitioner.combine(grp as u32, record.key);
            assert_eq!(partitioner.split(key), (grp as u32, record.key));
            restored += 1;
        }
    }
    println!("read {} records back in {:.2?}", restored, read_start.elapsed());
    assert_eq!(restored, num_records);

    std::fs::remove_dir_all(&dir)?;
    println!("ok");
    Ok(())
}
